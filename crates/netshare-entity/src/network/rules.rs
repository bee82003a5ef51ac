//! Credential and radio setting rules shared by network create and update.

use serde::{Deserialize, Serialize};

use netshare_core::AppError;

use super::radio::{FrequencyBand, SecurityType};

/// Maximum SSID length.
pub const MAX_NAME_LEN: usize = 32;
/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;
/// Maximum accepted password length.
pub const MAX_PASSWORD_LEN: usize = 63;
/// Valid channel range.
pub const CHANNEL_RANGE: std::ops::RangeInclusive<i32> = 1..=165;
/// Valid signal strength range in dBm.
pub const SIGNAL_RANGE: std::ops::RangeInclusive<i32> = -100..=-30;

/// The full set of user-editable network settings.
///
/// Create requests build this directly; updates merge the patch onto the
/// stored row first so the rules see the final state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// SSID.
    pub network_name: String,
    /// Passphrase (empty string or `None` for open networks).
    pub password: Option<String>,
    /// Security protocol.
    pub security_type: SecurityType,
    /// Radio band.
    pub frequency_band: FrequencyBand,
    /// Radio channel.
    pub channel: i32,
    /// Advertised signal strength (dBm).
    pub signal_strength: i32,
    /// Maximum simultaneously connected devices.
    pub max_devices: i32,
}

impl NetworkSettings {
    /// Check every rule and report all violations at once.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors: Vec<(String, String)> = Vec::new();
        let mut push = |field: &str, msg: &str| errors.push((field.to_string(), msg.to_string()));

        let name_len = self.network_name.trim().chars().count();
        if name_len == 0 {
            push("network_name", "Network name is required");
        } else if name_len > MAX_NAME_LEN {
            push("network_name", "Network name must be at most 32 characters");
        }

        let password = self.password.as_deref().unwrap_or("");
        if self.security_type.requires_password() && password.is_empty() {
            push("password", "Password is required for secured networks");
        }
        if !password.is_empty() {
            let len = password.chars().count();
            if len < MIN_PASSWORD_LEN {
                push("password", "Password must be at least 8 characters");
            } else if len > MAX_PASSWORD_LEN {
                push("password", "Password must be at most 63 characters");
            }
        }

        if !CHANNEL_RANGE.contains(&self.channel) {
            push("channel", "Channel must be between 1 and 165");
        }
        if !SIGNAL_RANGE.contains(&self.signal_strength) {
            push("signal_strength", "Signal strength must be between -100 and -30");
        }
        if self.max_devices < 1 {
            push("max_devices", "Max devices must be at least 1");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::fields("Invalid network settings", errors))
        }
    }

    /// The SSID to persist, without surrounding whitespace.
    pub fn stored_name(&self) -> &str {
        self.network_name.trim()
    }

    /// The password to persist: open networks with no passphrase store an empty string.
    pub fn stored_password(&self) -> String {
        self.password.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> NetworkSettings {
        NetworkSettings {
            network_name: "HomeNet".into(),
            password: Some("supersecret".into()),
            security_type: SecurityType::Wpa2,
            frequency_band: FrequencyBand::Ghz5,
            channel: 36,
            signal_strength: -50,
            max_devices: 32,
        }
    }

    fn failing_fields(s: &NetworkSettings) -> Vec<String> {
        let err = s.validate().unwrap_err();
        let details = err.details.expect("details");
        details
            .as_object()
            .expect("object")
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn test_secured_network_requires_password() {
        let mut s = settings();
        s.password = None;
        assert_eq!(failing_fields(&s), vec!["password".to_string()]);
    }

    #[test]
    fn test_open_network_without_password() {
        let mut s = settings();
        s.security_type = SecurityType::Open;
        s.password = Some(String::new());
        assert!(s.validate().is_ok());
        assert_eq!(s.stored_password(), "");
    }

    #[test]
    fn test_short_password_rejected_even_when_open() {
        let mut s = settings();
        s.security_type = SecurityType::Open;
        s.password = Some("short".into());
        assert_eq!(failing_fields(&s), vec!["password".to_string()]);
    }

    #[test]
    fn test_ranges_reported_together() {
        let mut s = settings();
        s.channel = 0;
        s.signal_strength = -20;
        s.max_devices = 0;
        let mut fields = failing_fields(&s);
        fields.sort();
        assert_eq!(fields, vec!["channel", "max_devices", "signal_strength"]);
    }

    #[test]
    fn test_name_length() {
        let mut s = settings();
        s.network_name = "x".repeat(33);
        assert_eq!(failing_fields(&s), vec!["network_name".to_string()]);
        s.network_name = "   ".into();
        assert_eq!(failing_fields(&s), vec!["network_name".to_string()]);
    }

    #[test]
    fn test_padded_name_fits_once_trimmed() {
        let mut s = settings();
        s.network_name = format!("  {}  ", "n".repeat(MAX_NAME_LEN));
        assert!(s.validate().is_ok());
        assert_eq!(s.stored_name().chars().count(), MAX_NAME_LEN);
    }
}
