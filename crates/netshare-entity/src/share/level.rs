//! Permission levels granted by shares.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use netshare_core::AppError;

/// A totally ordered permission level.
pub trait PermissionLevel: Copy + fmt::Debug {
    /// Return the privilege level (higher = more privileged).
    fn privilege_level(&self) -> u8;

    /// Check if this level grants at least the required one.
    fn has_at_least(&self, required: &Self) -> bool {
        self.privilege_level() >= required.privilege_level()
    }
}

/// Permission granted by a network share.
///
/// Ordered by privilege: Manage > Connect > View.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "network_permission", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NetworkPermission {
    /// See network details, not credentials.
    View,
    /// See credentials and attach devices.
    #[default]
    Connect,
    /// Edit settings and inspect usage.
    Manage,
}

impl NetworkPermission {
    /// Return the permission as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Connect => "connect",
            Self::Manage => "manage",
        }
    }
}

impl PermissionLevel for NetworkPermission {
    fn privilege_level(&self) -> u8 {
        match self {
            Self::View => 1,
            Self::Connect => 2,
            Self::Manage => 3,
        }
    }
}

impl fmt::Display for NetworkPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NetworkPermission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "connect" => Ok(Self::Connect),
            "manage" => Ok(Self::Manage),
            _ => Err(AppError::field(
                "permission_level",
                format!("Invalid network permission: '{s}'"),
            )),
        }
    }
}

/// Permission granted by a file share.
///
/// Ordered by privilege: Download > View.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "file_permission", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FilePermission {
    /// See file details and comments.
    View,
    /// Also fetch the file body.
    #[default]
    Download,
}

impl FilePermission {
    /// Return the permission as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Download => "download",
        }
    }
}

impl PermissionLevel for FilePermission {
    fn privilege_level(&self) -> u8 {
        match self {
            Self::View => 1,
            Self::Download => 2,
        }
    }
}

impl fmt::Display for FilePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilePermission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "download" => Ok(Self::Download),
            _ => Err(AppError::field(
                "permission_level",
                format!("Invalid file permission: '{s}'"),
            )),
        }
    }
}
