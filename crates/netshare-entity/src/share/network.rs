//! Network share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::grant::ShareGrant;
use super::level::NetworkPermission;

/// A grant of access to one network for one user.
///
/// At most one share exists per (network, user) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NetworkShare {
    /// Unique share identifier.
    pub id: Uuid,
    /// Shared network.
    pub network_id: Uuid,
    /// User receiving access.
    pub shared_with_id: Uuid,
    /// Granted level.
    pub permission_level: NetworkPermission,
    /// Whether the owner has left the share enabled.
    pub is_active: bool,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share stops granting access (None = never).
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShareGrant for NetworkShare {
    type Level = NetworkPermission;

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    fn level(&self) -> NetworkPermission {
        self.permission_level
    }
}

/// A network share joined with display names, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NetworkShareDetail {
    /// Share identifier.
    pub id: Uuid,
    /// Network identifier.
    pub network_id: Uuid,
    /// SSID.
    pub network_name: String,
    /// Network owner.
    pub owner_id: Uuid,
    /// Network owner's username.
    pub owner_username: String,
    /// Recipient.
    pub shared_with_id: Uuid,
    /// Recipient's username.
    pub shared_with_username: String,
    /// Granted level.
    pub permission_level: NetworkPermission,
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

impl NetworkShareDetail {
    /// Fill the computed expiry flag for the given instant.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.is_expired = self.expires_at.is_some_and(|exp| now >= exp);
        self
    }
}

/// Data required to create a network share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNetworkShare {
    /// Network being shared.
    pub network_id: Uuid,
    /// Recipient.
    pub shared_with_id: Uuid,
    /// Granted level.
    pub permission_level: NetworkPermission,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Changes an owner may make to an existing share of either kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShare<L> {
    /// New level.
    pub permission_level: Option<L>,
    /// Enable or disable the share.
    pub is_active: Option<bool>,
    /// New expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Remove the expiry entirely (wins over `expires_at`).
    #[serde(default)]
    pub clear_expiry: bool,
}

impl<L> UpdateShare<L> {
    /// Resolve the expiry to store given the current one.
    pub fn resolve_expiry(&self, current: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        if self.clear_expiry {
            None
        } else {
            self.expires_at.or(current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn share(level: NetworkPermission, active: bool, expires_in: Option<i64>) -> NetworkShare {
        let now = Utc::now();
        NetworkShare {
            id: Uuid::new_v4(),
            network_id: Uuid::new_v4(),
            shared_with_id: Uuid::new_v4(),
            permission_level: level,
            is_active: active,
            created_at: now,
            expires_at: expires_in.map(|s| now + Duration::seconds(s)),
        }
    }

    #[test]
    fn test_grants_requires_active() {
        let now = Utc::now();
        let s = share(NetworkPermission::Manage, false, None);
        assert!(!s.grants(NetworkPermission::View, now));
    }

    #[test]
    fn test_expired_share_stays_active_but_grants_nothing() {
        let s = share(NetworkPermission::Connect, true, Some(-60));
        let now = Utc::now();
        assert!(s.is_active);
        assert!(s.is_expired_at(now));
        assert!(!s.grants(NetworkPermission::View, now));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let s = share(NetworkPermission::Connect, true, Some(3600));
        let exp = s.expires_at.expect("expiry");
        assert!(s.grants(NetworkPermission::Connect, exp - Duration::seconds(1)));
        assert!(!s.grants(NetworkPermission::Connect, exp));
    }

    #[test]
    fn test_level_respected() {
        let now = Utc::now();
        let s = share(NetworkPermission::View, true, None);
        assert!(s.grants(NetworkPermission::View, now));
        assert!(!s.grants(NetworkPermission::Connect, now));
    }

    #[test]
    fn test_update_expiry_resolution() {
        let now = Utc::now();
        let keep: UpdateShare<NetworkPermission> = UpdateShare {
            permission_level: None,
            is_active: None,
            expires_at: None,
            clear_expiry: false,
        };
        assert_eq!(keep.resolve_expiry(Some(now)), Some(now));
        let clear = UpdateShare::<NetworkPermission> { clear_expiry: true, ..keep.clone() };
        assert_eq!(clear.resolve_expiry(Some(now)), None);
    }
}
