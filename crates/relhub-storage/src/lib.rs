//! # relhub-storage
//!
//! Snapshot storage for RelHub. Each revision of a release is a write-once
//! directory under `<state_dir>/unfinished/<project>/<version>/<number>/`.

pub mod providers;

pub use providers::local::LocalSnapshotStore;
