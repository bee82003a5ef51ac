//! Invitation handlers.

use axum::extract::{Path, State};
use uuid::Uuid;

use netshare_entity::invitation::{InvitationDetail, InvitationResponse, NetworkInvitation};

use super::{ApiResult, ok};
use crate::dto::request::InviteRequest;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/networks/{id}/invitations
pub async fn invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(network_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<InviteRequest>,
) -> ApiResult<NetworkInvitation> {
    ok(state
        .invitation_service
        .invite(&auth, network_id, req.into())
        .await?)
}

/// GET /api/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Vec<InvitationDetail>> {
    ok(state.invitation_service.list_pending(&auth).await?)
}

/// POST /api/invitations/{id}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<NetworkInvitation> {
    ok(state
        .invitation_service
        .respond(&auth, id, InvitationResponse::Accept)
        .await?)
}

/// POST /api/invitations/{id}/reject
pub async fn reject_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<NetworkInvitation> {
    ok(state
        .invitation_service
        .respond(&auth, id, InvitationResponse::Reject)
        .await?)
}
