//! Share and invitation defaults.

use serde::{Deserialize, Serialize};

/// Defaults applied when sharing networks and files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Lifetime of an invitation when the inviter does not supply one.
    #[serde(default = "default_invitation_expiry_days")]
    pub invitation_expiry_days: i64,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            invitation_expiry_days: default_invitation_expiry_days(),
        }
    }
}

fn default_invitation_expiry_days() -> i64 {
    7
}
