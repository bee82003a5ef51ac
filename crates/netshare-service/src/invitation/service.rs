//! Invitation service: sending and answering invitations.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use netshare_auth::access::{AccessChecker, NetworkAction};
use netshare_core::config::SharingConfig;
use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{InvitationRepository, NetworkRepository, UserRepository};
use netshare_entity::invitation::{
    CreateInvitation, InvitationDetail, InvitationResponse, InvitationStatus,
    InvitationTransition, NetworkInvitation,
};

use crate::context::RequestContext;
use crate::share::recipient::{require_future, require_recipient};

/// Sends invitations on behalf of network owners and records answers.
#[derive(Debug, Clone)]
pub struct InvitationService {
    invitations: Arc<InvitationRepository>,
    networks: Arc<NetworkRepository>,
    users: Arc<UserRepository>,
    access: Arc<AccessChecker>,
    /// Lifetime applied when the inviter gives no expiry.
    default_lifetime: Duration,
}

/// Input for inviting a user to a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvitation {
    /// Recipient.
    pub invited_user_id: Uuid,
    /// Optional expiry; defaults to the configured lifetime.
    pub expires_at: Option<DateTime<Utc>>,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(
        invitations: Arc<InvitationRepository>,
        networks: Arc<NetworkRepository>,
        users: Arc<UserRepository>,
        access: Arc<AccessChecker>,
        config: &SharingConfig,
    ) -> Self {
        Self {
            invitations,
            networks,
            users,
            access,
            default_lifetime: Duration::days(config.invitation_expiry_days),
        }
    }

    /// Invites a user to a network. Owner only.
    pub async fn invite(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
        req: NewInvitation,
    ) -> AppResult<NetworkInvitation> {
        let network = self
            .networks
            .find_by_id(network_id)
            .await?
            .ok_or_else(|| AppError::not_found("Network not found"))?;
        self.access
            .require_network(ctx.user_id, &network, NetworkAction::Administer, ctx.request_time)
            .await?;
        require_recipient(&self.users, ctx, "invited_user_id", req.invited_user_id).await?;
        require_future("expires_at", req.expires_at, ctx.request_time)?;

        let expires_at = req
            .expires_at
            .unwrap_or(ctx.request_time + self.default_lifetime);

        let invitation = self
            .invitations
            .create(&CreateInvitation {
                network_id: network.id,
                invited_user_id: req.invited_user_id,
                invited_by_id: ctx.user_id,
                expires_at,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            network_id = %network.id,
            invitation_id = %invitation.id,
            invited_user_id = %invitation.invited_user_id,
            expires_at = %invitation.expires_at,
            "Invitation sent"
        );

        Ok(invitation)
    }

    /// Pending invitations addressed to the caller.
    pub async fn list_pending(&self, ctx: &RequestContext) -> AppResult<Vec<InvitationDetail>> {
        self.invitations
            .list_pending_for_user(ctx.user_id, None)
            .await
    }

    /// Accepts or rejects an invitation addressed to the caller.
    ///
    /// An invitation past its expiry is marked expired and the response
    /// fails. Answering a non-pending invitation fails without changes.
    /// Accepting also grants a connect-level share.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        invitation_id: Uuid,
        response: InvitationResponse,
    ) -> AppResult<NetworkInvitation> {
        let invitation = self
            .invitations
            .find_for_invitee(invitation_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        let now = ctx.request_time;
        let transition = invitation.respond(response, now)?;

        let updated = match transition {
            InvitationTransition::Expire => {
                self.invitations
                    .transition(invitation.id, InvitationStatus::Expired, None)
                    .await?;
                warn!(
                    user_id = %ctx.user_id,
                    invitation_id = %invitation.id,
                    expires_at = %invitation.expires_at,
                    "Response to expired invitation"
                );
                return Err(AppError::conflict("Invitation has expired"));
            }
            InvitationTransition::Accept => self.invitations.accept(&invitation, now).await?,
            InvitationTransition::Reject => {
                self.invitations
                    .transition(invitation.id, transition.next_status(), Some(now))
                    .await?
            }
        };

        let updated =
            updated.ok_or_else(|| AppError::conflict("Invitation has already been answered"))?;

        info!(
            user_id = %ctx.user_id,
            network_id = %updated.network_id,
            invitation_id = %updated.id,
            status = %updated.status,
            "Invitation answered"
        );

        Ok(updated)
    }
}
