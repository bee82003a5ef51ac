//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use sqlx::PgPool;

use netshare_auth::jwt::JwtDecoder;
use netshare_core::config::AppConfig;
use netshare_core::traits::storage::StorageProvider;
use netshare_database::repositories::UserRepository;
use netshare_service::{
    CommentService, ConnectionService, DashboardService, DeviceService, FileService,
    FileShareService, InvitationService, NetworkService, NetworkShareService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Blob storage provider
    pub storage: Arc<dyn StorageProvider>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// User repository, to confirm token subjects exist
    pub user_repo: Arc<UserRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Profiles and user listing
    pub user_service: Arc<UserService>,
    /// Dashboard overview
    pub dashboard_service: Arc<DashboardService>,
    /// Device registration and status
    pub device_service: Arc<DeviceService>,
    /// Network CRUD and credentials
    pub network_service: Arc<NetworkService>,
    /// Device connections
    pub connection_service: Arc<ConnectionService>,
    /// Network shares
    pub network_share_service: Arc<NetworkShareService>,
    /// Network invitations
    pub invitation_service: Arc<InvitationService>,
    /// File upload and download
    pub file_service: Arc<FileService>,
    /// File shares
    pub file_share_service: Arc<FileShareService>,
    /// File comments
    pub comment_service: Arc<CommentService>,
}
