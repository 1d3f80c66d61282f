//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can
//! serialize/deserialize without pulling serde into the domain model.

pub mod records;
pub mod resolution;
pub mod rules;

pub use records::*;
pub use resolution::*;
pub use rules::*;
