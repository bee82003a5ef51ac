//! Request handlers, one module per domain.

pub mod comment;
pub mod connection;
pub mod device;
pub mod file;
pub mod health;
pub mod invitation;
pub mod network;
pub mod share;
pub mod user;

use axum::Json;

use crate::dto::ApiResponse;
use crate::error::ApiError;

/// Result type for JSON handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap data in the success envelope.
pub(crate) fn ok<T: serde::Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}
