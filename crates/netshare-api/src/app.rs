//! Application builder: wires repositories, services, router, and
//! middleware into an Axum app, and serves it.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tokio::sync::oneshot;
use tracing::{info, warn};

use netshare_auth::access::AccessChecker;
use netshare_auth::jwt::JwtDecoder;
use netshare_core::config::AppConfig;
use netshare_core::error::{AppError, ErrorKind};
use netshare_core::traits::storage::StorageProvider;
use netshare_database::repositories::{
    CommentRepository, ConnectionRepository, DeviceRepository, FileRepository,
    FileShareRepository, InvitationRepository, NetworkRepository, NetworkShareRepository,
    UserRepository,
};
use netshare_service::{
    CommentService, ConnectionService, DashboardService, DeviceService, FileService,
    FileShareService, InvitationService, NetworkService, NetworkShareService, UserService,
};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Construct every repository and service over one pool and storage provider.
pub fn build_state(
    config: AppConfig,
    db_pool: PgPool,
    storage: Arc<dyn StorageProvider>,
) -> AppState {
    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let device_repo = Arc::new(DeviceRepository::new(db_pool.clone()));
    let network_repo = Arc::new(NetworkRepository::new(db_pool.clone()));
    let connection_repo = Arc::new(ConnectionRepository::new(db_pool.clone()));
    let network_share_repo = Arc::new(NetworkShareRepository::new(db_pool.clone()));
    let invitation_repo = Arc::new(InvitationRepository::new(db_pool.clone()));
    let file_repo = Arc::new(FileRepository::new(db_pool.clone()));
    let file_share_repo = Arc::new(FileShareRepository::new(db_pool.clone()));
    let comment_repo = Arc::new(CommentRepository::new(db_pool.clone()));

    // ── Auth ─────────────────────────────────────────────────────
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let access = Arc::new(AccessChecker::new(
        network_share_repo.clone(),
        file_share_repo.clone(),
    ));

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        device_repo.clone(),
        network_repo.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        device_repo.clone(),
        network_repo.clone(),
        connection_repo.clone(),
        network_share_repo.clone(),
        invitation_repo.clone(),
    ));
    let device_service = Arc::new(DeviceService::new(
        device_repo.clone(),
        connection_repo.clone(),
    ));
    let network_service = Arc::new(NetworkService::new(
        network_repo.clone(),
        device_repo.clone(),
        connection_repo.clone(),
        network_share_repo.clone(),
        invitation_repo.clone(),
        access.clone(),
    ));
    let connection_service = Arc::new(ConnectionService::new(
        connection_repo,
        network_repo.clone(),
        device_repo,
        access.clone(),
    ));
    let network_share_service = Arc::new(NetworkShareService::new(
        network_share_repo,
        network_repo.clone(),
        user_repo.clone(),
        access.clone(),
    ));
    let invitation_service = Arc::new(InvitationService::new(
        invitation_repo,
        network_repo,
        user_repo.clone(),
        access.clone(),
        &config.sharing,
    ));
    let file_service = Arc::new(FileService::new(
        file_repo.clone(),
        storage.clone(),
        access.clone(),
        &config.storage,
    ));
    let file_share_service = Arc::new(FileShareService::new(
        file_share_repo,
        file_repo.clone(),
        user_repo.clone(),
        access.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(comment_repo, file_repo, access));

    AppState {
        config: Arc::new(config),
        db_pool,
        storage,
        jwt_decoder,
        user_repo,
        user_service,
        dashboard_service,
        device_service,
        network_service,
        connection_service,
        network_share_service,
        invitation_service,
        file_service,
        file_share_service,
        comment_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn run_server(state: AppState) -> Result<(), AppError> {
    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
        .parse()
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid server address", e)
        })?;

    let grace = Duration::from_secs(state.config.server.shutdown_grace_seconds);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!(%addr, "NetShare server listening");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = stop_tx.send(());
        })
        .into_future();

    // In-flight requests get the grace period to finish after the signal.
    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;
        }
        _ = async {
            if stop_rx.await.is_ok() {
                tokio::time::sleep(grace).await;
            } else {
                std::future::pending::<()>().await;
            }
        } => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, dropping open connections");
        }
    }

    info!("NetShare server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
