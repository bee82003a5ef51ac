//! Network handlers.

use axum::extract::{Path, State};
use uuid::Uuid;

use netshare_entity::network::{Network, NetworkStats};
use netshare_service::network::{NetworkCredentials, NetworkDetail};

use super::{ApiResult, ok};
use crate::dto::request::{CreateNetworkRequest, UpdateNetworkRequest};
use crate::dto::response::MessageResponse;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/networks
pub async fn list_networks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Vec<Network>> {
    ok(state.network_service.list_owned(&auth).await?)
}

/// POST /api/networks
pub async fn create_network(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateNetworkRequest>,
) -> ApiResult<Network> {
    ok(state.network_service.create(&auth, req.into()).await?)
}

/// GET /api/networks/{id}
pub async fn get_network(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<NetworkDetail> {
    ok(state.network_service.get(&auth, id).await?)
}

/// PUT /api/networks/{id}
pub async fn update_network(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateNetworkRequest>,
) -> ApiResult<Network> {
    ok(state.network_service.update(&auth, id, req.into()).await?)
}

/// DELETE /api/networks/{id}
pub async fn delete_network(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<MessageResponse> {
    state.network_service.delete(&auth, id).await?;
    ok(MessageResponse::new("Network deleted"))
}

/// GET /api/networks/{id}/credentials
pub async fn get_credentials(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<NetworkCredentials> {
    ok(state.network_service.credentials(&auth, id).await?)
}

/// GET /api/networks/{id}/stats
pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<NetworkStats> {
    ok(state.network_service.stats(&auth, id).await?)
}
