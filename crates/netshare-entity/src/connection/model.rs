//! Connection entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Valid connection quality range (percent).
pub const QUALITY_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

/// A device attached to a shared network.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Connection {
    /// Unique connection identifier.
    pub id: Uuid,
    /// Network the device is attached to.
    pub network_id: Uuid,
    /// Attached device.
    pub device_id: Uuid,
    /// Whether the device is currently connected.
    pub is_connected: bool,
    /// Link quality, 0..=100.
    pub connection_quality: i32,
    /// Bytes transferred over this connection.
    pub data_used: i64,
    /// When the device first connected.
    pub connected_at: DateTime<Utc>,
    /// Last reported activity.
    pub last_activity: DateTime<Utc>,
}

/// A connection joined with its device and network names, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConnectionDetail {
    /// Connection identifier.
    pub id: Uuid,
    /// Network identifier.
    pub network_id: Uuid,
    /// SSID.
    pub network_name: String,
    /// Device identifier.
    pub device_id: Uuid,
    /// Device display name.
    pub device_name: String,
    /// Owner of the device.
    pub device_owner_id: Uuid,
    /// Whether the device is currently connected.
    pub is_connected: bool,
    /// Link quality.
    pub connection_quality: i32,
    /// Bytes transferred.
    pub data_used: i64,
    /// When the device first connected.
    pub connected_at: DateTime<Utc>,
    /// Last reported activity.
    pub last_activity: DateTime<Utc>,
}

/// Data required to attach a device to a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConnection {
    /// Target network.
    pub network_id: Uuid,
    /// Device being attached.
    pub device_id: Uuid,
}

/// Usage numbers reported by a connected device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageReport {
    /// New link quality.
    pub connection_quality: Option<i32>,
    /// Bytes to add to the running total.
    pub data_used_delta: Option<i64>,
    /// Mark the device connected or disconnected.
    pub is_connected: Option<bool>,
}
