//! Infrastructure layer - Adapters binding the application to the outside
//!
//! Holds the HTTP surface, the snapshot store behind the game data port,
//! process configuration and shared state.

pub mod config;
pub mod http;
pub mod persistence;
pub mod state;
