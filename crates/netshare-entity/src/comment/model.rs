//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LEN: usize = 1000;

/// A comment left on a file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileComment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// File commented on.
    pub file_id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Comment text.
    pub comment: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// A comment joined with its author's username.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentDetail {
    /// Comment identifier.
    pub id: Uuid,
    /// File commented on.
    pub file_id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Author's username.
    pub username: String,
    /// Comment text.
    pub comment: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// Data required to post a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// File commented on.
    pub file_id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Comment text (1..=1000 characters).
    pub comment: String,
}
