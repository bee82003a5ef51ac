//! MAC address value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use netshare_core::AppError;

/// A hardware address in canonical `AA:BB:CC:DD:EE:FF` form.
///
/// Construction upper-cases the input before checking it, so
/// `aa:bb:cc:dd:ee:ff` is accepted and stored as `AA:BB:CC:DD:EE:FF`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    /// Parse and normalize a MAC address.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let normalized = input.trim().to_uppercase();
        if !is_canonical(&normalized) {
            return Err(AppError::field(
                "mac_address",
                "Invalid MAC address format. Use format: XX:XX:XX:XX:XX:XX",
            ));
        }
        Ok(Self(normalized))
    }

    /// The normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Six colon-separated pairs of upper-case hex digits.
fn is_canonical(s: &str) -> bool {
    let groups: Vec<&str> = s.split(':').collect();
    groups.len() == 6
        && groups.iter().all(|g| {
            g.len() == 2
                && g.chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        })
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MacAddress {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> String {
        mac.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netshare_core::error::ErrorKind;

    #[test]
    fn test_accepts_canonical() {
        let mac = MacAddress::parse("AA:BB:CC:DD:EE:FF").expect("valid");
        assert_eq!(mac.as_str(), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_normalizes_lowercase() {
        let mac = MacAddress::parse("0a:1b:2c:3d:4e:5f").expect("valid");
        assert_eq!(mac.to_string(), "0A:1B:2C:3D:4E:5F");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = MacAddress::parse("INVALID").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.details.is_some());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        for bad in [
            "AA:BB:CC:DD:EE",
            "AA:BB:CC:DD:EE:FF:00",
            "AA-BB-CC-DD-EE-FF",
            "AAB:BC:CD:DE:EF:F0",
            "GG:BB:CC:DD:EE:FF",
            "",
        ] {
            assert!(MacAddress::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: MacAddress = serde_json::from_str("\"aa:bb:cc:dd:ee:ff\"").expect("valid");
        assert_eq!(ok.as_str(), "AA:BB:CC:DD:EE:FF");
        assert!(serde_json::from_str::<MacAddress>("\"nope\"").is_err());
    }
}
