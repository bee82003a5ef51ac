//! # netshare-api
//!
//! HTTP API layer for NetShare built on Axum.
//!
//! Provides the REST endpoints under `/api`, the bearer-token extractor,
//! request DTOs with validation rules, error mapping, and request logging.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
