//! Device entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::DeviceType;
use super::mac::MacAddress;

/// A device registered by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    /// Unique device identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Display name.
    pub device_name: String,
    /// Kind of hardware.
    pub device_type: DeviceType,
    /// Normalized MAC address (globally unique).
    pub mac_address: String,
    /// Last known IP address.
    pub ip_address: Option<String>,
    /// Whether the device is currently online.
    pub is_online: bool,
    /// Last time the device reported in.
    pub last_seen: DateTime<Utc>,
    /// When the device was registered.
    pub created_at: DateTime<Utc>,
}

impl Device {
    /// Check whether the given user owns this device.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Data required to register a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDevice {
    /// Owning user.
    pub user_id: Uuid,
    /// Display name.
    pub device_name: String,
    /// Kind of hardware.
    pub device_type: DeviceType,
    /// Validated MAC address.
    pub mac_address: MacAddress,
    /// Optional IP address.
    pub ip_address: Option<String>,
}

/// Fields that may be changed on an existing device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDevice {
    /// New display name.
    pub device_name: Option<String>,
    /// New device type.
    pub device_type: Option<DeviceType>,
    /// New MAC address.
    pub mac_address: Option<MacAddress>,
    /// New IP address.
    pub ip_address: Option<String>,
}
