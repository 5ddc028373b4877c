//! # relhub-core
//!
//! Core crate for RelHub. Contains the unified error system, configuration
//! schemas, typed identifiers, and the snapshot storage trait.
//!
//! This crate has **no** internal dependencies on other RelHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
