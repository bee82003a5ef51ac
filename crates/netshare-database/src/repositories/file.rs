//! File repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use netshare_core::error::{AppError, ErrorKind};
use netshare_core::result::AppResult;
use netshare_entity::file::{CreateFile, File};

/// Repository for uploaded file records.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID regardless of owner.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List a user's files, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE owner_id = $1 ORDER BY created_at DESC")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Count a user's files.
    pub async fn count_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))
    }

    /// Record an uploaded file.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (owner_id, storage_path, filename, file_type, file_size, \
             mime_type, is_public) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.storage_path)
        .bind(&data.filename)
        .bind(data.file_type)
        .bind(data.file_size)
        .bind(&data.mime_type)
        .bind(data.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Increment the download counter and return the new value.
    pub async fn increment_download_count(&self, id: Uuid) -> AppResult<i32> {
        sqlx::query_scalar(
            "UPDATE files SET download_count = download_count + 1 WHERE id = $1 \
             RETURNING download_count",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to increment downloads", e)
        })
    }

    /// Delete a file record; shares and comments cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}
