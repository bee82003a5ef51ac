//! Network entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::radio::{FrequencyBand, SecurityType};
use super::rules::NetworkSettings;

/// A WiFi network a user publishes from one of their devices.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Network {
    /// Unique network identifier.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Device broadcasting the network (owned by `owner_id`).
    pub source_device_id: Uuid,
    /// SSID, unique per owner.
    pub network_name: String,
    /// Passphrase. Only revealed to callers with connect permission.
    #[serde(skip_serializing)]
    pub password: String,
    /// Security protocol.
    pub security_type: SecurityType,
    /// Radio band.
    pub frequency_band: FrequencyBand,
    /// Radio channel (1..=165).
    pub channel: i32,
    /// Signal strength in dBm (-100..=-30).
    pub signal_strength: i32,
    /// Maximum simultaneously connected devices.
    pub max_devices: i32,
    /// Whether the network accepts connections.
    pub is_active: bool,
    /// When the network was created.
    pub created_at: DateTime<Utc>,
    /// When the network was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Network {
    /// Check whether the given user owns this network.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Current settings, used as the base when applying an update.
    pub fn settings(&self) -> NetworkSettings {
        NetworkSettings {
            network_name: self.network_name.clone(),
            password: Some(self.password.clone()),
            security_type: self.security_type,
            frequency_band: self.frequency_band,
            channel: self.channel,
            signal_strength: self.signal_strength,
            max_devices: self.max_devices,
        }
    }

    /// Apply a partial update on top of the current settings.
    pub fn merged_settings(&self, update: &UpdateNetwork) -> NetworkSettings {
        let mut settings = self.settings();
        if let Some(name) = &update.network_name {
            settings.network_name = name.clone();
        }
        if let Some(password) = &update.password {
            settings.password = Some(password.clone());
        }
        if let Some(security) = update.security_type {
            settings.security_type = security;
        }
        if let Some(band) = update.frequency_band {
            settings.frequency_band = band;
        }
        if let Some(channel) = update.channel {
            settings.channel = channel;
        }
        if let Some(signal) = update.signal_strength {
            settings.signal_strength = signal;
        }
        if let Some(max) = update.max_devices {
            settings.max_devices = max;
        }
        settings
    }
}

/// Data required to create a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNetwork {
    /// Owning user.
    pub owner_id: Uuid,
    /// Source device (must belong to the owner).
    pub source_device_id: Uuid,
    /// Validated settings.
    pub settings: NetworkSettings,
}

/// Partial update for a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNetwork {
    /// New SSID.
    pub network_name: Option<String>,
    /// New passphrase.
    pub password: Option<String>,
    /// New security protocol.
    pub security_type: Option<SecurityType>,
    /// New band.
    pub frequency_band: Option<FrequencyBand>,
    /// New channel.
    pub channel: Option<i32>,
    /// New signal strength.
    pub signal_strength: Option<i32>,
    /// New device limit.
    pub max_devices: Option<i32>,
    /// New source device.
    pub source_device_id: Option<Uuid>,
    /// Enable or disable the network.
    pub is_active: Option<bool>,
}

/// Aggregated usage statistics for a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStats {
    /// SSID.
    pub network_name: String,
    /// Whether the network accepts connections.
    pub is_active: bool,
    /// Devices currently connected.
    pub connected_devices: i64,
    /// Configured device limit.
    pub max_devices: i32,
    /// Sum of bytes used across all connections.
    pub total_data_used: i64,
    /// Signal strength in dBm.
    pub signal_strength: i32,
    /// Radio channel.
    pub channel: i32,
    /// Radio band.
    pub frequency_band: FrequencyBand,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> Network {
        Network {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            source_device_id: Uuid::new_v4(),
            network_name: "Cafe".into(),
            password: "password123".into(),
            security_type: SecurityType::Wpa2,
            frequency_band: FrequencyBand::Ghz24,
            channel: 6,
            signal_strength: -60,
            max_devices: 10,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_not_serialized() {
        let json = serde_json::to_value(network()).expect("serialize");
        assert!(json.get("password").is_none());
        assert_eq!(json["frequency_band"], "2.4GHz");
    }

    #[test]
    fn test_merge_keeps_unchanged_fields() {
        let n = network();
        let update = UpdateNetwork {
            channel: Some(11),
            security_type: Some(SecurityType::Open),
            password: Some(String::new()),
            ..Default::default()
        };
        let merged = n.merged_settings(&update);
        assert_eq!(merged.channel, 11);
        assert_eq!(merged.network_name, "Cafe");
        assert_eq!(merged.max_devices, 10);
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn test_merge_switching_to_secured_requires_password() {
        let mut n = network();
        n.security_type = SecurityType::Open;
        n.password = String::new();
        let update = UpdateNetwork {
            security_type: Some(SecurityType::Wpa3),
            ..Default::default()
        };
        assert!(n.merged_settings(&update).validate().is_err());
    }
}
