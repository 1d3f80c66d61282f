//! Outbound ports - Interfaces the application layer depends on
//!
//! Infrastructure adapters implement these traits; application services
//! depend on the traits, not on concrete implementations.

mod game_data_port;

pub use game_data_port::GameDataPort;
