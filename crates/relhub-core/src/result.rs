//! Convenience result type alias for RelHub.

use crate::error::AppError;

/// A specialized `Result` type for RelHub operations.
pub type AppResult<T> = Result<T, AppError>;
