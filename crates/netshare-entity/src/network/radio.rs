//! Security type and frequency band enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use netshare_core::AppError;

/// WiFi security protocol.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "security_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    /// No password.
    Open,
    /// WEP.
    Wep,
    /// WPA.
    Wpa,
    /// WPA2.
    #[default]
    Wpa2,
    /// WPA3.
    Wpa3,
}

impl SecurityType {
    /// Whether networks using this protocol must carry a password.
    pub fn requires_password(&self) -> bool {
        !matches!(self, Self::Open)
    }

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Wep => "wep",
            Self::Wpa => "wpa",
            Self::Wpa2 => "wpa2",
            Self::Wpa3 => "wpa3",
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SecurityType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "wep" => Ok(Self::Wep),
            "wpa" => Ok(Self::Wpa),
            "wpa2" => Ok(Self::Wpa2),
            "wpa3" => Ok(Self::Wpa3),
            _ => Err(AppError::field(
                "security_type",
                format!("Invalid security type: '{s}'"),
            )),
        }
    }
}

/// Radio frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "frequency_band")]
pub enum FrequencyBand {
    /// 2.4 GHz.
    #[serde(rename = "2.4GHz")]
    #[sqlx(rename = "2.4GHz")]
    Ghz24,
    /// 5 GHz.
    #[serde(rename = "5GHz")]
    #[sqlx(rename = "5GHz")]
    Ghz5,
    /// 6 GHz.
    #[serde(rename = "6GHz")]
    #[sqlx(rename = "6GHz")]
    Ghz6,
}

impl FrequencyBand {
    /// Return the band label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ghz24 => "2.4GHz",
            Self::Ghz5 => "5GHz",
            Self::Ghz6 => "6GHz",
        }
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FrequencyBand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "2.4GHZ" => Ok(Self::Ghz24),
            "5GHZ" => Ok(Self::Ghz5),
            "6GHZ" => Ok(Self::Ghz6),
            _ => Err(AppError::field(
                "frequency_band",
                format!("Invalid frequency band: '{s}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_open_skips_password() {
        assert!(!SecurityType::Open.requires_password());
        assert!(SecurityType::Wep.requires_password());
        assert!(SecurityType::Wpa3.requires_password());
        assert_eq!(SecurityType::default(), SecurityType::Wpa2);
    }

    #[test]
    fn test_band_serde_labels() {
        let json = serde_json::to_string(&FrequencyBand::Ghz24).expect("serialize");
        assert_eq!(json, "\"2.4GHz\"");
        let band: FrequencyBand = serde_json::from_str("\"6GHz\"").expect("deserialize");
        assert_eq!(band, FrequencyBand::Ghz6);
        assert_eq!("5ghz".parse::<FrequencyBand>().expect("parse"), FrequencyBand::Ghz5);
    }
}
