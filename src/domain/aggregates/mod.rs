//! Aggregates - Consistency boundaries assembled by the resolver

mod outfit_assignment;

pub use outfit_assignment::{AssignmentError, NpcOutfitAssignment, OutfitCandidate};
