//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use netshare_entity::connection::UsageReport;
use netshare_entity::device::DeviceType;
use netshare_entity::network::{FrequencyBand, NetworkSettings, SecurityType, UpdateNetwork};
use netshare_entity::share::{FilePermission, NetworkPermission, UpdateShare};
use netshare_service::device::{DeviceChanges, RegisterDevice};
use netshare_service::invitation::NewInvitation;
use netshare_service::network::NewNetwork;
use netshare_service::share::NewShare;

/// Register device request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDeviceRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Device name must be 1 to 100 characters"))]
    pub device_name: String,
    /// Kind of device.
    pub device_type: DeviceType,
    /// MAC address, any case.
    #[validate(length(min = 1, message = "MAC address is required"))]
    pub mac_address: String,
    /// Last known IP address.
    #[validate(ip(message = "Invalid IP address"))]
    pub ip_address: Option<String>,
}

impl From<RegisterDeviceRequest> for RegisterDevice {
    fn from(req: RegisterDeviceRequest) -> Self {
        Self {
            device_name: req.device_name.trim().to_string(),
            device_type: req.device_type,
            mac_address: req.mac_address,
            ip_address: req.ip_address,
        }
    }
}

/// Update device request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDeviceRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100, message = "Device name must be 1 to 100 characters"))]
    pub device_name: Option<String>,
    /// New kind.
    pub device_type: Option<DeviceType>,
    /// New MAC address.
    pub mac_address: Option<String>,
    /// New IP address.
    #[validate(ip(message = "Invalid IP address"))]
    pub ip_address: Option<String>,
}

impl From<UpdateDeviceRequest> for DeviceChanges {
    fn from(req: UpdateDeviceRequest) -> Self {
        Self {
            device_name: req.device_name.map(|n| n.trim().to_string()),
            device_type: req.device_type,
            mac_address: req.mac_address,
            ip_address: req.ip_address,
        }
    }
}

/// Device status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeviceStatusRequest {
    /// New online flag.
    pub is_online: bool,
}

/// Create network request.
///
/// Field ranges are checked together by the network rules so every
/// violation is reported at once.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNetworkRequest {
    /// Device broadcasting the network.
    pub source_device_id: Uuid,
    /// SSID.
    pub network_name: String,
    /// Passphrase.
    pub password: Option<String>,
    /// Security protocol (default `wpa2`).
    #[serde(default)]
    pub security_type: SecurityType,
    /// Radio band.
    pub frequency_band: FrequencyBand,
    /// Radio channel.
    pub channel: i32,
    /// Signal strength in dBm.
    pub signal_strength: i32,
    /// Device limit.
    pub max_devices: i32,
}

impl From<CreateNetworkRequest> for NewNetwork {
    fn from(req: CreateNetworkRequest) -> Self {
        Self {
            source_device_id: req.source_device_id,
            settings: NetworkSettings {
                network_name: req.network_name,
                password: req.password,
                security_type: req.security_type,
                frequency_band: req.frequency_band,
                channel: req.channel,
                signal_strength: req.signal_strength,
                max_devices: req.max_devices,
            },
        }
    }
}

/// Partial network update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateNetworkRequest {
    pub network_name: Option<String>,
    pub password: Option<String>,
    pub security_type: Option<SecurityType>,
    pub frequency_band: Option<FrequencyBand>,
    pub channel: Option<i32>,
    pub signal_strength: Option<i32>,
    pub max_devices: Option<i32>,
    pub source_device_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl From<UpdateNetworkRequest> for UpdateNetwork {
    fn from(req: UpdateNetworkRequest) -> Self {
        Self {
            network_name: req.network_name,
            password: req.password,
            security_type: req.security_type,
            frequency_band: req.frequency_band,
            channel: req.channel,
            signal_strength: req.signal_strength,
            max_devices: req.max_devices,
            source_device_id: req.source_device_id,
            is_active: req.is_active,
        }
    }
}

/// Connect one of the caller's devices to a network.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConnectDeviceRequest {
    /// Device to connect.
    pub device_id: Uuid,
}

/// Usage report for a connection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UsageReportRequest {
    /// Link quality, 0 to 100.
    #[validate(range(min = 0, max = 100, message = "Connection quality must be between 0 and 100"))]
    pub connection_quality: Option<i32>,
    /// Bytes used since the last report.
    #[validate(range(min = 0, message = "Data used cannot decrease"))]
    pub data_used_delta: Option<i64>,
    /// Connected flag.
    pub is_connected: Option<bool>,
}

impl From<UsageReportRequest> for UsageReport {
    fn from(req: UsageReportRequest) -> Self {
        Self {
            connection_quality: req.connection_quality,
            data_used_delta: req.data_used_delta,
            is_connected: req.is_connected,
        }
    }
}

/// Share request for either share kind.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShareRequest<L> {
    /// Recipient.
    pub shared_with_id: Uuid,
    /// Level to grant; defaults to the kind's default level.
    #[serde(default)]
    pub permission_level: L,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Network share request.
pub type ShareNetworkRequest = ShareRequest<NetworkPermission>;
/// File share request.
pub type ShareFileRequest = ShareRequest<FilePermission>;

impl<L> From<ShareRequest<L>> for NewShare<L> {
    fn from(req: ShareRequest<L>) -> Self {
        Self {
            shared_with_id: req.shared_with_id,
            permission_level: req.permission_level,
            expires_at: req.expires_at,
        }
    }
}

/// Update share request for either share kind.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateShareRequest<L> {
    /// New level.
    pub permission_level: Option<L>,
    /// Enable or disable.
    pub is_active: Option<bool>,
    /// New expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Remove the expiry.
    #[serde(default)]
    pub clear_expiry: bool,
}

impl<L> From<UpdateShareRequest<L>> for UpdateShare<L> {
    fn from(req: UpdateShareRequest<L>) -> Self {
        Self {
            permission_level: req.permission_level,
            is_active: req.is_active,
            expires_at: req.expires_at,
            clear_expiry: req.clear_expiry,
        }
    }
}

/// Invite request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteRequest {
    /// Recipient.
    pub invited_user_id: Uuid,
    /// Optional expiry; defaults to the configured lifetime.
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<InviteRequest> for NewInvitation {
    fn from(req: InviteRequest) -> Self {
        Self {
            invited_user_id: req.invited_user_id,
            expires_at: req.expires_at,
        }
    }
}

/// Add comment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    /// Comment text.
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1 to 1000 characters"))]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_device_rules() {
        let req: RegisterDeviceRequest = serde_json::from_value(serde_json::json!({
            "device_name": "",
            "device_type": "laptop",
            "mac_address": "aa:bb:cc:dd:ee:ff",
            "ip_address": "not-an-ip"
        }))
        .expect("deserialize");
        let errs = req.validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("device_name"));
        assert!(fields.contains_key("ip_address"));
    }

    #[test]
    fn test_share_request_defaults_level() {
        let req: ShareNetworkRequest = serde_json::from_value(serde_json::json!({
            "shared_with_id": Uuid::nil(),
        }))
        .expect("deserialize");
        assert_eq!(req.permission_level, NetworkPermission::Connect);
        assert!(req.expires_at.is_none());

        let req: ShareFileRequest = serde_json::from_value(serde_json::json!({
            "shared_with_id": Uuid::nil(),
            "permission_level": "view",
        }))
        .expect("deserialize");
        assert_eq!(req.permission_level, FilePermission::View);
    }

    #[test]
    fn test_create_network_defaults_security() {
        let req: CreateNetworkRequest = serde_json::from_value(serde_json::json!({
            "source_device_id": Uuid::nil(),
            "network_name": "Home",
            "password": "password123",
            "frequency_band": "5GHz",
            "channel": 36,
            "signal_strength": -50,
            "max_devices": 8
        }))
        .expect("deserialize");
        let network: NewNetwork = req.into();
        assert_eq!(network.settings.security_type, SecurityType::Wpa2);
        assert!(network.settings.validate().is_ok());
    }
}
