//! Core traits defined in `relhub-core` and implemented by other crates.

pub mod snapshot;

pub use snapshot::SnapshotStore;
