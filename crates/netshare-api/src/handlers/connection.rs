//! Connection handlers.

use axum::extract::{Path, State};
use uuid::Uuid;

use netshare_entity::connection::{Connection, ConnectionDetail};

use super::{ApiResult, ok};
use crate::dto::request::{ConnectDeviceRequest, UsageReportRequest};
use crate::dto::response::MessageResponse;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/networks/{id}/connections
pub async fn list_connections(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(network_id): Path<Uuid>,
) -> ApiResult<Vec<ConnectionDetail>> {
    ok(state.connection_service.list(&auth, network_id).await?)
}

/// POST /api/networks/{id}/connections
pub async fn connect_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(network_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ConnectDeviceRequest>,
) -> ApiResult<Connection> {
    ok(state
        .connection_service
        .connect(&auth, network_id, req.device_id)
        .await?)
}

/// DELETE /api/networks/{id}/connections/{connection_id}
pub async fn disconnect_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((network_id, connection_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<MessageResponse> {
    state
        .connection_service
        .disconnect(&auth, network_id, connection_id)
        .await?;
    ok(MessageResponse::new("Device disconnected"))
}

/// PUT /api/connections/{id}/usage
pub async fn report_usage(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(connection_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UsageReportRequest>,
) -> ApiResult<Connection> {
    ok(state
        .connection_service
        .report_usage(&auth, connection_id, req.into())
        .await?)
}
