//! Invitation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use netshare_core::AppError;

use super::status::{InvitationResponse, InvitationStatus, InvitationTransition};

/// An offer from a network owner to another user.
///
/// At most one invitation exists per (network, invited user) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NetworkInvitation {
    /// Unique invitation identifier.
    pub id: Uuid,
    /// Network offered.
    pub network_id: Uuid,
    /// Recipient.
    pub invited_user_id: Uuid,
    /// Sender (the network owner).
    pub invited_by_id: Uuid,
    /// Lifecycle state.
    pub status: InvitationStatus,
    /// When the invitation was sent.
    pub created_at: DateTime<Utc>,
    /// Responses at or after this instant expire the invitation.
    pub expires_at: DateTime<Utc>,
    /// When the recipient accepted or rejected.
    pub responded_at: Option<DateTime<Utc>>,
}

impl NetworkInvitation {
    /// Whether the expiry has been reached at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Decide the transition a response causes at `now`.
    ///
    /// Responding to a non-pending invitation is a conflict and causes no
    /// transition. A pending invitation past its expiry transitions to
    /// `expired` whatever the response was.
    pub fn respond(
        &self,
        response: InvitationResponse,
        now: DateTime<Utc>,
    ) -> Result<InvitationTransition, AppError> {
        if self.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Invitation has already been {}",
                self.status
            )));
        }
        if self.is_expired_at(now) {
            return Ok(InvitationTransition::Expire);
        }
        Ok(match response {
            InvitationResponse::Accept => InvitationTransition::Accept,
            InvitationResponse::Reject => InvitationTransition::Reject,
        })
    }
}

/// An invitation joined with network and sender names, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvitationDetail {
    /// Invitation identifier.
    pub id: Uuid,
    /// Network identifier.
    pub network_id: Uuid,
    /// SSID.
    pub network_name: String,
    /// Recipient.
    pub invited_user_id: Uuid,
    /// Recipient's username.
    pub invited_username: String,
    /// Sender.
    pub invited_by_id: Uuid,
    /// Sender's username.
    pub invited_by_username: String,
    /// Lifecycle state.
    pub status: InvitationStatus,
    /// When the invitation was sent.
    pub created_at: DateTime<Utc>,
    /// Expiry.
    pub expires_at: DateTime<Utc>,
    /// Response time.
    pub responded_at: Option<DateTime<Utc>>,
}

/// Data required to send an invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvitation {
    /// Network offered.
    pub network_id: Uuid,
    /// Recipient.
    pub invited_user_id: Uuid,
    /// Sender.
    pub invited_by_id: Uuid,
    /// Expiry (must be in the future).
    pub expires_at: DateTime<Utc>,
}
