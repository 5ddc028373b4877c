//! Snapshot store implementations.

pub mod local;
