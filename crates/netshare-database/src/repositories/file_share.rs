//! File share repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use netshare_core::error::{AppError, ErrorKind};
use netshare_core::result::AppResult;
use netshare_entity::share::{
    CreateFileShare, FilePermission, FileShare, FileShareDetail, UpdateShare,
};

use crate::error::write_error;

const DETAIL_SELECT: &str = "SELECT s.id, s.file_id, f.filename, f.owner_id, \
     o.username AS owner_username, s.shared_with_id, u.username AS shared_with_username, \
     s.permission_level, s.is_active, s.created_at, s.expires_at \
     FROM file_shares s \
     JOIN files f ON f.id = s.file_id \
     JOIN users o ON o.id = f.owner_id \
     JOIN users u ON u.id = s.shared_with_id";

/// Repository for file shares.
#[derive(Debug, Clone)]
pub struct FileShareRepository {
    pool: PgPool,
}

impl FileShareRepository {
    /// Create a new file share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the share scoped to a file.
    pub async fn find_in_file(
        &self,
        share_id: Uuid,
        file_id: Uuid,
    ) -> AppResult<Option<FileShare>> {
        sqlx::query_as::<_, FileShare>(
            "SELECT * FROM file_shares WHERE id = $1 AND file_id = $2",
        )
        .bind(share_id)
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Find the share linking a file to a user, if any.
    pub async fn find_for_user(
        &self,
        file_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<FileShare>> {
        sqlx::query_as::<_, FileShare>(
            "SELECT * FROM file_shares WHERE file_id = $1 AND shared_with_id = $2",
        )
        .bind(file_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// List every share of a file.
    pub async fn list_by_file(&self, file_id: Uuid) -> AppResult<Vec<FileShareDetail>> {
        sqlx::query_as::<_, FileShareDetail>(&format!(
            "{DETAIL_SELECT} WHERE s.file_id = $1 ORDER BY s.created_at DESC"
        ))
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// List active shares granted to a user, expired ones included.
    pub async fn list_shared_with(&self, user_id: Uuid) -> AppResult<Vec<FileShareDetail>> {
        sqlx::query_as::<_, FileShareDetail>(&format!(
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
            "SELECT COUNT(*) FROM file_shares WHERE shared_with_id = $1 AND is_active \
             AND (expires_at IS NULL OR expires_at > $2)",
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count shares", e))
    }

    /// Create a share; a second share for the same pair is a conflict.
    pub async fn create(&self, data: &CreateFileShare) -> AppResult<FileShare> {
        sqlx::query_as::<_, FileShare>(
            "INSERT INTO file_shares (file_id, shared_with_id, permission_level, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.file_id)
        .bind(data.shared_with_id)
        .bind(data.permission_level)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create share",
            "File is already shared with this user",
        ))
    }

    /// Apply an owner's changes to a share.
    pub async fn update(
        &self,
        share: &FileShare,
        data: &UpdateShare<FilePermission>,
    ) -> AppResult<FileShare> {
        sqlx::query_as::<_, FileShare>(
            "UPDATE file_shares SET permission_level = $2, is_active = $3, expires_at = $4 \
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
        let result = sqlx::query("DELETE FROM file_shares WHERE id = $1")
            .bind(share_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }
}
