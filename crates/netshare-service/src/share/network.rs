//! Network share service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use netshare_auth::access::{AccessChecker, NetworkAction};
use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{NetworkRepository, NetworkShareRepository, UserRepository};
use netshare_entity::network::Network;
use netshare_entity::share::{
    CreateNetworkShare, NetworkPermission, NetworkShare, NetworkShareDetail, UpdateShare,
};

use super::recipient::{NewShare, require_future, require_recipient};
use crate::context::RequestContext;

/// Manages who a network is shared with.
#[derive(Debug, Clone)]
pub struct NetworkShareService {
    shares: Arc<NetworkShareRepository>,
    networks: Arc<NetworkRepository>,
    users: Arc<UserRepository>,
    access: Arc<AccessChecker>,
}

impl NetworkShareService {
    /// Creates a new network share service.
    pub fn new(
        shares: Arc<NetworkShareRepository>,
        networks: Arc<NetworkRepository>,
        users: Arc<UserRepository>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            shares,
            networks,
            users,
            access,
        }
    }

    /// Lists shares of a network. Owner only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
    ) -> AppResult<Vec<NetworkShareDetail>> {
        let network = self.owned_network(ctx, network_id).await?;
        let shares = self.shares.list_by_network(network.id).await?;
        Ok(shares.into_iter().map(|s| s.at(ctx.request_time)).collect())
    }

    /// Active shares granted to the caller, expired ones flagged.
    pub async fn shared_with_me(&self, ctx: &RequestContext) -> AppResult<Vec<NetworkShareDetail>> {
        let shares = self.shares.list_shared_with(ctx.user_id).await?;
        Ok(shares.into_iter().map(|s| s.at(ctx.request_time)).collect())
    }

    /// Shares a network with another user. Owner only; a second share for
    /// the same user is a conflict.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
        req: NewShare<NetworkPermission>,
    ) -> AppResult<NetworkShare> {
        let network = self.owned_network(ctx, network_id).await?;
        require_recipient(&self.users, ctx, "shared_with_id", req.shared_with_id).await?;
        require_future("expires_at", req.expires_at, ctx.request_time)?;

        let share = self
            .shares
            .create(&CreateNetworkShare {
                network_id: network.id,
                shared_with_id: req.shared_with_id,
                permission_level: req.permission_level,
                expires_at: req.expires_at,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            network_id = %network.id,
            share_id = %share.id,
            shared_with_id = %share.shared_with_id,
            permission_level = %share.permission_level,
            "Network shared"
        );

        Ok(share)
    }

    /// Changes level, active flag, or expiry of a share. Owner only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
        share_id: Uuid,
        req: UpdateShare<NetworkPermission>,
    ) -> AppResult<NetworkShare> {
        let network = self.owned_network(ctx, network_id).await?;
        let share = self.find_share(share_id, network.id).await?;
        if !req.clear_expiry {
            require_future("expires_at", req.expires_at, ctx.request_time)?;
        }

        let share = self.shares.update(&share, &req).await?;
        info!(
            user_id = %ctx.user_id,
            network_id = %network.id,
            share_id = %share.id,
            "Network share updated"
        );
        Ok(share)
    }

    /// Revokes a share. Owner only.
    pub async fn revoke(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
        share_id: Uuid,
    ) -> AppResult<()> {
        let network = self.owned_network(ctx, network_id).await?;
        let share = self.find_share(share_id, network.id).await?;
        self.shares.delete(share.id).await?;
        info!(
            user_id = %ctx.user_id,
            network_id = %network.id,
            share_id = %share.id,
            "Network share revoked"
        );
        Ok(())
    }

    async fn owned_network(&self, ctx: &RequestContext, network_id: Uuid) -> AppResult<Network> {
        let network = self
            .networks
            .find_by_id(network_id)
            .await?
            .ok_or_else(|| AppError::not_found("Network not found"))?;
        self.access
            .require_network(ctx.user_id, &network, NetworkAction::Administer, ctx.request_time)
            .await?;
        Ok(network)
    }

    async fn find_share(&self, share_id: Uuid, network_id: Uuid) -> AppResult<NetworkShare> {
        self.shares
            .find_in_network(share_id, network_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))
    }
}
