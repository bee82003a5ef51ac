//! Network share repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use netshare_core::error::{AppError, ErrorKind};
use netshare_core::result::AppResult;
use netshare_entity::share::{
    CreateNetworkShare, NetworkPermission, NetworkShare, NetworkShareDetail, UpdateShare,
};

use crate::error::write_error;

const DETAIL_SELECT: &str = "SELECT s.id, s.network_id, n.network_name, n.owner_id, \
     o.username AS owner_username, s.shared_with_id, u.username AS shared_with_username, \
     s.permission_level, s.is_active, s.created_at, s.expires_at \
     FROM network_shares s \
     JOIN networks n ON n.id = s.network_id \
     JOIN users o ON o.id = n.owner_id \
     JOIN users u ON u.id = s.shared_with_id";

/// Repository for network shares.
#[derive(Debug, Clone)]
pub struct NetworkShareRepository {
    pool: PgPool,
}

impl NetworkShareRepository {
    /// Create a new network share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the share scoped to a network.
    pub async fn find_in_network(
        &self,
        share_id: Uuid,
        network_id: Uuid,
    ) -> AppResult<Option<NetworkShare>> {
        sqlx::query_as::<_, NetworkShare>(
            "SELECT * FROM network_shares WHERE id = $1 AND network_id = $2",
        )
        .bind(share_id)
        .bind(network_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Find the share linking a network to a user, if any.
    pub async fn find_for_user(
        &self,
        network_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<NetworkShare>> {
        sqlx::query_as::<_, NetworkShare>(
            "SELECT * FROM network_shares WHERE network_id = $1 AND shared_with_id = $2",
        )
        .bind(network_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// List every share of a network.
    pub async fn list_by_network(&self, network_id: Uuid) -> AppResult<Vec<NetworkShareDetail>> {
        sqlx::query_as::<_, NetworkShareDetail>(&format!(
            "{DETAIL_SELECT} WHERE s.network_id = $1 ORDER BY s.created_at DESC"
        ))
        .bind(network_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// List active shares granted to a user, expired ones included.
    pub async fn list_shared_with(&self, user_id: Uuid) -> AppResult<Vec<NetworkShareDetail>> {
        sqlx::query_as::<_, NetworkShareDetail>(&format!(
            "{DETAIL_SELECT} WHERE s.shared_with_id = $1 AND s.is_active \
             ORDER BY s.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// Count shares granted to a user that are active and unexpired at `now`.
    pub async fn count_effective_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM network_shares WHERE shared_with_id = $1 AND is_active \
             AND (expires_at IS NULL OR expires_at > $2)",
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count shares", e))
    }

    /// Create a share; a second share for the same pair is a conflict.
    pub async fn create(&self, data: &CreateNetworkShare) -> AppResult<NetworkShare> {
        sqlx::query_as::<_, NetworkShare>(
            "INSERT INTO network_shares (network_id, shared_with_id, permission_level, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.network_id)
        .bind(data.shared_with_id)
        .bind(data.permission_level)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create share",
            "Network is already shared with this user",
        ))
    }

    /// Apply an owner's changes to a share.
    pub async fn update(
        &self,
        share: &NetworkShare,
        data: &UpdateShare<NetworkPermission>,
    ) -> AppResult<NetworkShare> {
        sqlx::query_as::<_, NetworkShare>(
            "UPDATE network_shares SET permission_level = $2, is_active = $3, expires_at = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(share.id)
        .bind(data.permission_level.unwrap_or(share.permission_level))
        .bind(data.is_active.unwrap_or(share.is_active))
        .bind(data.resolve_expiry(share.expires_at))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update share", e))
    }

    /// Delete a share.
    pub async fn delete(&self, share_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM network_shares WHERE id = $1")
            .bind(share_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }
}
