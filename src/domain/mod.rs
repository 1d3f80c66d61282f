//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: NPC records, outfit records, distribution entries
//! - Value Objects: form keys, filter criteria, load order, keyword table
//! - Aggregates: the per-NPC outfit assignment

pub mod aggregates;
pub mod entities;
pub mod value_objects;
