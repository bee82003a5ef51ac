//! File comment handlers.

use axum::extract::{Path, State};
use uuid::Uuid;

use netshare_service::file::{CommentList, CommentView};

use super::{ApiResult, ok};
use crate::dto::request::CommentRequest;
use crate::dto::response::MessageResponse;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/files/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
) -> ApiResult<CommentList> {
    ok(state.comment_service.list(&auth, file_id).await?)
}

/// POST /api/files/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> ApiResult<CommentView> {
    ok(state
        .comment_service
        .add(&auth, file_id, &req.comment)
        .await?)
}

/// DELETE /api/files/{id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((file_id, comment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<MessageResponse> {
    state
        .comment_service
        .delete(&auth, file_id, comment_id)
        .await?;
    ok(MessageResponse::new("Comment deleted"))
}
