//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::FileCategory;
use super::size::display_size;

/// Longest stored file name, in characters.
pub const MAX_FILENAME_LEN: usize = 255;
/// Longest stored content type, in characters.
pub const MAX_MIME_TYPE_LEN: usize = 255;

/// A file uploaded by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Path of the blob within the storage provider.
    #[serde(skip_serializing)]
    pub storage_path: String,
    /// Original file name.
    pub filename: String,
    /// Category derived from the content type at upload.
    pub file_type: FileCategory,
    /// Size in bytes.
    pub file_size: i64,
    /// Declared content type.
    pub mime_type: String,
    /// Whether anyone may view and download the file.
    pub is_public: bool,
    /// Number of completed downloads.
    pub download_count: i32,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the file record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Check whether the given user owns this file.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Size formatted for display.
    pub fn display_size(&self) -> String {
        display_size(self.file_size)
    }
}

/// Data required to record an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Owning user.
    pub owner_id: Uuid,
    /// Blob path.
    pub storage_path: String,
    /// Original file name.
    pub filename: String,
    /// Category.
    pub file_type: FileCategory,
    /// Size in bytes.
    pub file_size: i64,
    /// Content type.
    pub mime_type: String,
    /// Public flag.
    pub is_public: bool,
}
