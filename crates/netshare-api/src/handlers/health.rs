//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use netshare_database::connection::ping;

use crate::dto::ApiResponse;
use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let database = ping(&state.db_pool).await.unwrap_or(false);
    let storage = state.storage.health_check().await.unwrap_or(false);
    let healthy = database && storage;

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database { "connected" } else { "unreachable" }.to_string(),
        storage: if storage { "available" } else { "unavailable" }.to_string(),
    };

    (status, Json(ApiResponse::ok(body)))
}
