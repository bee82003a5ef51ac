//! Profile, user listing, and dashboard handlers.

use axum::extract::State;

use netshare_entity::user::UserSummary;
use netshare_service::user::{Dashboard, Profile};

use super::{ApiResult, ok};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Profile> {
    ok(state.user_service.profile(&auth).await?)
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Vec<UserSummary>> {
    ok(state.user_service.list_others(&auth).await?)
}

/// GET /api/dashboard
pub async fn dashboard(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Dashboard> {
    ok(state.dashboard_service.overview(&auth).await?)
}
