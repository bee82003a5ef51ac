//! Route definitions for the NetShare HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! Every handler except health takes an `AuthUser`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Multipart framing on top of the raw upload limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the router with all routes, body limit, and request logging.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(device_routes())
        .merge(network_routes())
        .merge(share_routes())
        .merge(invitation_routes())
        .merge(file_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Profile, user listing, dashboard
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users", get(handlers::user::list_users))
        .route("/dashboard", get(handlers::user::dashboard))
}

/// Device CRUD and status
fn device_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/devices",
            get(handlers::device::list_devices).post(handlers::device::register_device),
        )
        .route(
            "/devices/{id}",
            get(handlers::device::get_device)
                .put(handlers::device::update_device)
                .delete(handlers::device::delete_device),
        )
        .route(
            "/devices/{id}/status",
            get(handlers::device::get_status).put(handlers::device::set_status),
        )
}

/// Network CRUD, credentials, stats, connections
fn network_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/networks",
            get(handlers::network::list_networks).post(handlers::network::create_network),
        )
        .route(
            "/networks/{id}",
            get(handlers::network::get_network)
                .put(handlers::network::update_network)
                .delete(handlers::network::delete_network),
        )
        .route(
            "/networks/{id}/credentials",
            get(handlers::network::get_credentials),
        )
        .route("/networks/{id}/stats", get(handlers::network::get_stats))
        .route(
            "/networks/{id}/connections",
            get(handlers::connection::list_connections)
                .post(handlers::connection::connect_device),
        )
        .route(
            "/networks/{id}/connections/{connection_id}",
            delete(handlers::connection::disconnect_device),
        )
        .route(
            "/connections/{id}/usage",
            put(handlers::connection::report_usage),
        )
}

/// Network and file shares
fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/networks/shared",
            get(handlers::share::networks_shared_with_me),
        )
        .route(
            "/networks/{id}/shares",
            get(handlers::share::list_network_shares).post(handlers::share::share_network),
        )
        .route(
            "/networks/{id}/shares/{share_id}",
            put(handlers::share::update_network_share)
                .delete(handlers::share::revoke_network_share),
        )
        .route("/files/shared", get(handlers::share::files_shared_with_me))
        .route(
            "/files/{id}/shares",
            get(handlers::share::list_file_shares).post(handlers::share::share_file),
        )
        .route(
            "/files/{id}/shares/{share_id}",
            put(handlers::share::update_file_share).delete(handlers::share::revoke_file_share),
        )
}

/// Invitations
fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/networks/{id}/invitations",
            post(handlers::invitation::invite),
        )
        .route("/invitations", get(handlers::invitation::list_invitations))
        .route(
            "/invitations/{id}/accept",
            post(handlers::invitation::accept_invitation),
        )
        .route(
            "/invitations/{id}/reject",
            post(handlers::invitation::reject_invitation),
        )
}

/// File upload, download, deletion, comments
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::upload_file),
        )
        .route(
            "/files/{id}",
            get(handlers::file::get_file).delete(handlers::file::delete_file),
        )
        .route("/files/{id}/download", get(handlers::file::download_file))
        .route(
            "/files/{id}/comments",
            get(handlers::comment::list_comments).post(handlers::comment::add_comment),
        )
        .route(
            "/files/{id}/comments/{comment_id}",
            delete(handlers::comment::delete_comment),
        )
}
