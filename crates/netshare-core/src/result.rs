//! Convenience result type alias for NetShare.

use crate::error::AppError;

/// A specialized `Result` type for NetShare operations.
pub type AppResult<T> = Result<T, AppError>;
