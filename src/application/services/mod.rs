//! Application services - Use case implementations
//!
//! Services accept port dependencies and return domain types or DTOs; the
//! HTTP layer stays thin.

pub mod resolution_service;
pub mod rule_set_service;

pub use resolution_service::{
    resolve, Resolution, ResolutionError, ResolutionService, ResolutionWarning,
};
pub use rule_set_service::{NewEntryRequest, RuleSetError, RuleSetService};
