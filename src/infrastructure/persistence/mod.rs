//! Persistence adapters - concrete implementations of the outbound ports

mod snapshot_store;

pub use snapshot_store::SnapshotStore;
