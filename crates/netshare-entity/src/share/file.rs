//! File share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::grant::ShareGrant;
use super::level::FilePermission;

/// A grant of access to one file for one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileShare {
    /// Unique share identifier.
    pub id: Uuid,
    /// Shared file.
    pub file_id: Uuid,
    /// User receiving access.
    pub shared_with_id: Uuid,
    /// Granted level.
    pub permission_level: FilePermission,
    /// Whether the owner has left the share enabled.
    pub is_active: bool,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share stops granting access (None = never).
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShareGrant for FileShare {
    type Level = FilePermission;

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    fn level(&self) -> FilePermission {
        self.permission_level
    }
}

/// A file share joined with display names, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileShareDetail {
    /// Share identifier.
    pub id: Uuid,
    /// File identifier.
    pub file_id: Uuid,
    /// File name.
    pub filename: String,
    /// File owner.
    pub owner_id: Uuid,
    /// File owner's username.
    pub owner_username: String,
    /// Recipient.
    pub shared_with_id: Uuid,
    /// Recipient's username.
    pub shared_with_username: String,
    /// Granted level.
    pub permission_level: FilePermission,
    /// Enabled flag as stored.
    pub is_active: bool,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// Expiry, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// Computed at read time; never persisted.
    #[sqlx(skip)]
    pub is_expired: bool,
}

impl FileShareDetail {
    /// Fill the computed expiry flag for the given instant.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.is_expired = self.expires_at.is_some_and(|exp| now >= exp);
        self
    }
}

/// Data required to create a file share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileShare {
    /// File being shared.
    pub file_id: Uuid,
    /// Recipient.
    pub shared_with_id: Uuid,
    /// Granted level.
    pub permission_level: FilePermission,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}
