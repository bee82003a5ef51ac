//! Pure permission decisions over loaded rows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use netshare_entity::file::File;
use netshare_entity::network::Network;
use netshare_entity::share::{
    FilePermission, FileShare, NetworkPermission, NetworkShare, ShareGrant,
};

/// Something a user may try to do with a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkAction {
    /// Read network details (not the password).
    View,
    /// Read the SSID and password.
    ReadCredentials,
    /// Attach one of the caller's devices.
    Connect,
    /// Edit settings, read stats and the connection list.
    Manage,
    /// Delete, share, revoke shares, invite. Owner only.
    Administer,
}

impl NetworkAction {
    /// Level a share must grant, or `None` for owner-only actions.
    pub fn required_level(&self) -> Option<NetworkPermission> {
        match self {
            Self::View => Some(NetworkPermission::View),
            Self::ReadCredentials | Self::Connect => Some(NetworkPermission::Connect),
            Self::Manage => Some(NetworkPermission::Manage),
            Self::Administer => None,
        }
    }
}

/// Something a user may try to do with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Read file details and comments, post comments.
    View,
    /// Fetch the file body.
    Download,
    /// Delete, share, revoke shares. Owner only.
    Administer,
}

impl FileAction {
    /// Level a share must grant, or `None` for owner-only actions.
    pub fn required_level(&self) -> Option<FilePermission> {
        match self {
            Self::View => Some(FilePermission::View),
            Self::Download => Some(FilePermission::Download),
            Self::Administer => None,
        }
    }
}

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessGrant {
    /// The caller owns the entity.
    Owner,
    /// The file is public.
    Public,
    /// An active share covers the action.
    Share,
}

/// Decide a network action. `share` must be the caller's share for this
/// network, if one exists.
pub fn resolve_network(
    user_id: Uuid,
    network: &Network,
    share: Option<&NetworkShare>,
    action: NetworkAction,
    now: DateTime<Utc>,
) -> Option<AccessGrant> {
    if network.is_owned_by(user_id) {
        return Some(AccessGrant::Owner);
    }
    let required = action.required_level()?;
    let share = share.filter(|s| s.network_id == network.id && s.shared_with_id == user_id)?;
    share.grants(required, now).then_some(AccessGrant::Share)
}

/// Decide a file action. `share` must be the caller's share for this
/// file, if one exists.
pub fn resolve_file(
    user_id: Uuid,
    file: &File,
    share: Option<&FileShare>,
    action: FileAction,
    now: DateTime<Utc>,
) -> Option<AccessGrant> {
    if file.is_owned_by(user_id) {
        return Some(AccessGrant::Owner);
    }
    let required = action.required_level()?;
    if file.is_public {
        return Some(AccessGrant::Public);
    }
    let share = share.filter(|s| s.file_id == file.id && s.shared_with_id == user_id)?;
    share.grants(required, now).then_some(AccessGrant::Share)
}

/// `can_view(U, F)`: owner, public, or an effective share of any level.
pub fn can_view_file(
    user_id: Uuid,
    file: &File,
    share: Option<&FileShare>,
    now: DateTime<Utc>,
) -> bool {
    resolve_file(user_id, file, share, FileAction::View, now).is_some()
}

/// `can_connect(U, N)`: owner, or an effective share at connect or manage.
pub fn can_connect_network(
    user_id: Uuid,
    network: &Network,
    share: Option<&NetworkShare>,
    now: DateTime<Utc>,
) -> bool {
    resolve_network(user_id, network, share, NetworkAction::Connect, now).is_some()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use netshare_entity::file::FileCategory;
    use netshare_entity::network::{FrequencyBand, SecurityType};

    use super::*;

    fn network(owner: Uuid) -> Network {
        Network {
            id: Uuid::new_v4(),
            owner_id: owner,
            source_device_id: Uuid::new_v4(),
            network_name: "Office".into(),
            password: "hunter2hunter2".into(),
            security_type: SecurityType::Wpa2,
            frequency_band: FrequencyBand::Ghz5,
            channel: 36,
            signal_strength: -40,
            max_devices: 5,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn file(owner: Uuid, is_public: bool) -> File {
        File {
            id: Uuid::new_v4(),
            owner_id: owner,
            storage_path: "files/2025/01/01/x.txt".into(),
            filename: "x.txt".into(),
            file_type: FileCategory::Other,
            file_size: 10,
            mime_type: "text/plain".into(),
            is_public,
            download_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn net_share(
        n: &Network,
        user: Uuid,
        level: NetworkPermission,
        active: bool,
        expires: Option<DateTime<Utc>>,
    ) -> NetworkShare {
        NetworkShare {
            id: Uuid::new_v4(),
            network_id: n.id,
            shared_with_id: user,
            permission_level: level,
            is_active: active,
            created_at: Utc::now(),
            expires_at: expires,
        }
    }

    fn file_share(
        f: &File,
        user: Uuid,
        level: FilePermission,
        expires: Option<DateTime<Utc>>,
    ) -> FileShare {
        FileShare {
            id: Uuid::new_v4(),
            file_id: f.id,
            shared_with_id: user,
            permission_level: level,
            is_active: true,
            created_at: Utc::now(),
            expires_at: expires,
        }
    }

    #[test]
    fn test_owner_may_do_everything() {
        let owner = Uuid::new_v4();
        let n = network(owner);
        let now = Utc::now();
        for action in [
            NetworkAction::View,
            NetworkAction::ReadCredentials,
            NetworkAction::Connect,
            NetworkAction::Manage,
            NetworkAction::Administer,
        ] {
            assert_eq!(
                resolve_network(owner, &n, None, action, now),
                Some(AccessGrant::Owner)
            );
        }
    }

    #[test]
    fn test_can_connect_requires_connect_or_manage() {
        let n = network(Uuid::new_v4());
        let user = Uuid::new_v4();
        let now = Utc::now();
        assert!(!can_connect_network(user, &n, None, now));
        let view = net_share(&n, user, NetworkPermission::View, true, None);
        assert!(!can_connect_network(user, &n, Some(&view), now));
        let connect = net_share(&n, user, NetworkPermission::Connect, true, None);
        assert!(can_connect_network(user, &n, Some(&connect), now));
        let manage = net_share(&n, user, NetworkPermission::Manage, true, None);
        assert!(can_connect_network(user, &n, Some(&manage), now));
    }

    #[test]
    fn test_view_share_cannot_read_credentials() {
        let n = network(Uuid::new_v4());
        let user = Uuid::new_v4();
        let now = Utc::now();
        let view = net_share(&n, user, NetworkPermission::View, true, None);
        assert!(resolve_network(user, &n, Some(&view), NetworkAction::View, now).is_some());
        assert!(
            resolve_network(user, &n, Some(&view), NetworkAction::ReadCredentials, now).is_none()
        );
    }

    #[test]
    fn test_manage_share_cannot_administer() {
        let n = network(Uuid::new_v4());
        let user = Uuid::new_v4();
        let manage = net_share(&n, user, NetworkPermission::Manage, true, None);
        assert!(
            resolve_network(user, &n, Some(&manage), NetworkAction::Administer, Utc::now())
                .is_none()
        );
    }

    #[test]
    fn test_inactive_or_expired_share_denied() {
        let n = network(Uuid::new_v4());
        let user = Uuid::new_v4();
        let now = Utc::now();
        let inactive = net_share(&n, user, NetworkPermission::Manage, false, None);
        assert!(!can_connect_network(user, &n, Some(&inactive), now));
        let expired = net_share(
            &n,
            user,
            NetworkPermission::Manage,
            true,
            Some(now - Duration::minutes(1)),
        );
        assert!(!can_connect_network(user, &n, Some(&expired), now));
    }

    #[test]
    fn test_decision_and_expiry_flag_agree_at_one_instant() {
        let n = network(Uuid::new_v4());
        let user = Uuid::new_v4();
        let request_time = Utc::now();
        let share = net_share(
            &n,
            user,
            NetworkPermission::Connect,
            true,
            Some(request_time),
        );

        assert!(share.is_expired_at(request_time));
        assert!(
            resolve_network(user, &n, Some(&share), NetworkAction::Connect, request_time)
                .is_none()
        );

        let earlier = request_time - Duration::seconds(1);
        assert!(!share.is_expired_at(earlier));
        assert_eq!(
            resolve_network(user, &n, Some(&share), NetworkAction::Connect, earlier),
            Some(AccessGrant::Share)
        );
    }

    #[test]
    fn test_share_for_another_user_ignored() {
        let n = network(Uuid::new_v4());
        let someone_else = net_share(&n, Uuid::new_v4(), NetworkPermission::Manage, true, None);
        assert!(!can_connect_network(Uuid::new_v4(), &n, Some(&someone_else), Utc::now()));
    }

    #[test]
    fn test_public_file_viewable_and_downloadable_by_anyone() {
        let f = file(Uuid::new_v4(), true);
        let stranger = Uuid::new_v4();
        let now = Utc::now();
        assert!(can_view_file(stranger, &f, None, now));
        assert_eq!(
            resolve_file(stranger, &f, None, FileAction::Download, now),
            Some(AccessGrant::Public)
        );
        assert!(resolve_file(stranger, &f, None, FileAction::Administer, now).is_none());
    }

    #[test]
    fn test_private_file_needs_share() {
        let f = file(Uuid::new_v4(), false);
        let user = Uuid::new_v4();
        let now = Utc::now();
        assert!(!can_view_file(user, &f, None, now));
        let view = file_share(&f, user, FilePermission::View, None);
        assert!(can_view_file(user, &f, Some(&view), now));
        assert!(resolve_file(user, &f, Some(&view), FileAction::Download, now).is_none());
        let download = file_share(&f, user, FilePermission::Download, None);
        assert_eq!(
            resolve_file(user, &f, Some(&download), FileAction::Download, now),
            Some(AccessGrant::Share)
        );
    }

    #[test]
    fn test_file_share_expiry() {
        let f = file(Uuid::new_v4(), false);
        let user = Uuid::new_v4();
        let now = Utc::now();
        let share = file_share(&f, user, FilePermission::Download, Some(now));
        assert!(!can_view_file(user, &f, Some(&share), now));
        assert!(can_view_file(user, &f, Some(&share), now - Duration::seconds(1)));
    }
}
