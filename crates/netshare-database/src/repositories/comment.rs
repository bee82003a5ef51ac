//! File comment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use netshare_core::error::{AppError, ErrorKind};
use netshare_core::result::AppResult;
use netshare_entity::comment::{CommentDetail, CreateComment, FileComment};

/// Repository for comments on files.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a comment scoped to a file.
    pub async fn find_in_file(&self, id: Uuid, file_id: Uuid) -> AppResult<Option<FileComment>> {
        sqlx::query_as::<_, FileComment>(
            "SELECT * FROM file_comments WHERE id = $1 AND file_id = $2",
        )
        .bind(id)
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// Comments on a file with author names, newest first.
    pub async fn list_by_file(&self, file_id: Uuid) -> AppResult<Vec<CommentDetail>> {
        sqlx::query_as::<_, CommentDetail>(
            "SELECT c.id, c.file_id, c.user_id, u.username, c.comment, c.created_at \
             FROM file_comments c JOIN users u ON u.id = c.user_id \
             WHERE c.file_id = $1 ORDER BY c.created_at DESC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    /// Post a comment and return it with the author's name.
    pub async fn create(&self, data: &CreateComment) -> AppResult<CommentDetail> {
        sqlx::query_as::<_, CommentDetail>(
            "WITH inserted AS ( \
                INSERT INTO file_comments (file_id, user_id, comment) VALUES ($1, $2, $3) \
                RETURNING * \
             ) \
             SELECT i.id, i.file_id, i.user_id, u.username, i.comment, i.created_at \
             FROM inserted i JOIN users u ON u.id = i.user_id",
        )
        .bind(data.file_id)
        .bind(data.user_id)
        .bind(&data.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    /// Delete a comment.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM file_comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete comment", e))?;
        Ok(result.rows_affected() > 0)
    }
}
