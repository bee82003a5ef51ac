//! Invitation status and the transitions a response can cause.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an invitation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    /// Awaiting a response.
    #[default]
    Pending,
    /// Accepted by the invited user.
    Accepted,
    /// Rejected by the invited user.
    Rejected,
    /// A response arrived after the expiry.
    Expired,
}

impl InvitationStatus {
    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the invited user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationResponse {
    /// Accept the invitation.
    Accept,
    /// Decline the invitation.
    Reject,
}

/// Outcome of applying a response to a pending invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationTransition {
    /// Move to `accepted` and grant access.
    Accept,
    /// Move to `rejected`.
    Reject,
    /// Move to `expired`; the response itself fails.
    Expire,
}

impl InvitationTransition {
    /// The status stored after this transition.
    pub fn next_status(&self) -> InvitationStatus {
        match self {
            Self::Accept => InvitationStatus::Accepted,
            Self::Reject => InvitationStatus::Rejected,
            Self::Expire => InvitationStatus::Expired,
        }
    }

    /// Whether `responded_at` is recorded.
    pub fn records_response(&self) -> bool {
        !matches!(self, Self::Expire)
    }
}
