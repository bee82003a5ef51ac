//! Device type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of hardware a device represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "device_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Laptop computer.
    Laptop,
    /// Mobile phone.
    Phone,
    /// Tablet.
    Tablet,
    /// Router.
    Router,
    /// Mobile hotspot.
    Hotspot,
    /// Anything else.
    Other,
}

impl DeviceType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Laptop => "laptop",
            Self::Phone => "phone",
            Self::Tablet => "tablet",
            Self::Router => "router",
            Self::Hotspot => "hotspot",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = netshare_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "laptop" => Ok(Self::Laptop),
            "phone" => Ok(Self::Phone),
            "tablet" => Ok(Self::Tablet),
            "router" => Ok(Self::Router),
            "hotspot" => Ok(Self::Hotspot),
            "other" => Ok(Self::Other),
            _ => Err(netshare_core::AppError::field(
                "device_type",
                format!("Invalid device type: '{s}'"),
            )),
        }
    }
}
