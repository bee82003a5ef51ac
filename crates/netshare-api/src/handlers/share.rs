//! Network and file share handlers.

use axum::extract::{Path, State};
use uuid::Uuid;

use netshare_entity::share::{
    FilePermission, FileShare, FileShareDetail, NetworkPermission, NetworkShare,
    NetworkShareDetail,
};

use super::{ApiResult, ok};
use crate::dto::request::{ShareFileRequest, ShareNetworkRequest, UpdateShareRequest};
use crate::dto::response::MessageResponse;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/networks/shared
pub async fn networks_shared_with_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Vec<NetworkShareDetail>> {
    ok(state.network_share_service.shared_with_me(&auth).await?)
}

/// GET /api/networks/{id}/shares
pub async fn list_network_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(network_id): Path<Uuid>,
) -> ApiResult<Vec<NetworkShareDetail>> {
    ok(state.network_share_service.list(&auth, network_id).await?)
}

/// POST /api/networks/{id}/shares
pub async fn share_network(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(network_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ShareNetworkRequest>,
) -> ApiResult<NetworkShare> {
    ok(state
        .network_share_service
        .share(&auth, network_id, req.into())
        .await?)
}

/// PUT /api/networks/{id}/shares/{share_id}
pub async fn update_network_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((network_id, share_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateShareRequest<NetworkPermission>>,
) -> ApiResult<NetworkShare> {
    ok(state
        .network_share_service
        .update(&auth, network_id, share_id, req.into())
        .await?)
}

/// DELETE /api/networks/{id}/shares/{share_id}
pub async fn revoke_network_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((network_id, share_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<MessageResponse> {
    state
        .network_share_service
        .revoke(&auth, network_id, share_id)
        .await?;
    ok(MessageResponse::new("Share revoked"))
}

/// GET /api/files/shared
pub async fn files_shared_with_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Vec<FileShareDetail>> {
    ok(state.file_share_service.shared_with_me(&auth).await?)
}

/// GET /api/files/{id}/shares
pub async fn list_file_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
) -> ApiResult<Vec<FileShareDetail>> {
    ok(state.file_share_service.list(&auth, file_id).await?)
}

/// POST /api/files/{id}/shares
pub async fn share_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ShareFileRequest>,
) -> ApiResult<FileShare> {
    ok(state
        .file_share_service
        .share(&auth, file_id, req.into())
        .await?)
}

/// PUT /api/files/{id}/shares/{share_id}
pub async fn update_file_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((file_id, share_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<UpdateShareRequest<FilePermission>>,
) -> ApiResult<FileShare> {
    ok(state
        .file_share_service
        .update(&auth, file_id, share_id, req.into())
        .await?)
}

/// DELETE /api/files/{id}/shares/{share_id}
pub async fn revoke_file_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((file_id, share_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<MessageResponse> {
    state
        .file_share_service
        .revoke(&auth, file_id, share_id)
        .await?;
    ok(MessageResponse::new("Share revoked"))
}
