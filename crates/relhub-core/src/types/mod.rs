//! Core type definitions used across the RelHub workspace.

pub mod id;
pub mod release_key;

pub use id::*;
pub use release_key::ReleaseKey;
