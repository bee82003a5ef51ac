//! Network CRUD service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use netshare_auth::access::{AccessChecker, AccessGrant, NetworkAction};
use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{
    ConnectionRepository, DeviceRepository, InvitationRepository, NetworkRepository,
    NetworkShareRepository,
};
use netshare_entity::connection::ConnectionDetail;
use netshare_entity::invitation::InvitationDetail;
use netshare_entity::network::{
    CreateNetwork, Network, NetworkSettings, NetworkStats, SecurityType, UpdateNetwork,
};
use netshare_entity::share::NetworkShareDetail;

use crate::context::RequestContext;

/// Manages networks and gates access to their details and credentials.
#[derive(Debug, Clone)]
pub struct NetworkService {
    networks: Arc<NetworkRepository>,
    devices: Arc<DeviceRepository>,
    connections: Arc<ConnectionRepository>,
    shares: Arc<NetworkShareRepository>,
    invitations: Arc<InvitationRepository>,
    access: Arc<AccessChecker>,
}

/// Input for creating a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNetwork {
    /// Device broadcasting the network; must belong to the caller.
    pub source_device_id: Uuid,
    /// Requested settings.
    pub settings: NetworkSettings,
}

/// A network as seen by one caller.
///
/// Sections the caller may not see are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkDetail {
    /// The network row (never includes the password).
    #[serde(flatten)]
    pub network: Network,
    /// Why the caller can see it.
    pub access: AccessGrant,
    /// Currently connected devices, for callers who can manage the network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<ConnectionDetail>>,
    /// Shares, owner only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<Vec<NetworkShareDetail>>,
    /// Pending invitations, owner only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_invitations: Option<Vec<InvitationDetail>>,
}

/// What a device needs to join a network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkCredentials {
    /// Network identifier.
    pub network_id: Uuid,
    /// SSID.
    pub network_name: String,
    /// Passphrase (empty for open networks).
    pub password: String,
    /// Security protocol.
    pub security_type: SecurityType,
}

impl NetworkService {
    /// Creates a new network service.
    pub fn new(
        networks: Arc<NetworkRepository>,
        devices: Arc<DeviceRepository>,
        connections: Arc<ConnectionRepository>,
        shares: Arc<NetworkShareRepository>,
        invitations: Arc<InvitationRepository>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            networks,
            devices,
            connections,
            shares,
            invitations,
            access,
        }
    }

    /// Lists networks the caller owns.
    pub async fn list_owned(&self, ctx: &RequestContext) -> AppResult<Vec<Network>> {
        self.networks.list_by_owner(ctx.user_id).await
    }

    /// Creates a network broadcast from one of the caller's devices.
    pub async fn create(&self, ctx: &RequestContext, req: NewNetwork) -> AppResult<Network> {
        if self.devices.count_by_user(ctx.user_id).await? == 0 {
            return Err(AppError::field(
                "source_device_id",
                "Register a device before creating a network",
            ));
        }
        self.require_own_device(ctx.user_id, req.source_device_id)
            .await?;
        req.settings.validate()?;

        let network = self
            .networks
            .create(&CreateNetwork {
                owner_id: ctx.user_id,
                source_device_id: req.source_device_id,
                settings: req.settings,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            network_id = %network.id,
            network_name = %network.network_name,
            "Network created"
        );

        Ok(network)
    }

    /// Loads a network the caller may view, with the sections their access
    /// level allows.
    pub async fn get(&self, ctx: &RequestContext, network_id: Uuid) -> AppResult<NetworkDetail> {
        let network = self.find(network_id).await?;
        let access = self
            .access
            .require_network(ctx.user_id, &network, NetworkAction::View, ctx.request_time)
            .await?;

        let can_manage = self
            .access
            .network(ctx.user_id, &network, NetworkAction::Manage, ctx.request_time)
            .await?
            .is_some();
        let connections = if can_manage {
            let live = self
                .connections
                .list_by_network(network.id)
                .await?
                .into_iter()
                .filter(|c| c.is_connected)
                .collect();
            Some(live)
        } else {
            None
        };

        let (shares, pending_invitations) = if access == AccessGrant::Owner {
            let shares = self
                .shares
                .list_by_network(network.id)
                .await?
                .into_iter()
                .map(|s| s.at(ctx.request_time))
                .collect();
            let invitations = self.invitations.list_pending_for_network(network.id).await?;
            (Some(shares), Some(invitations))
        } else {
            (None, None)
        };

        Ok(NetworkDetail {
            network,
            access,
            connections,
            shares,
            pending_invitations,
        })
    }

    /// Applies a partial update. Requires manage access; the merged
    /// settings must pass the same rules as creation.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
        update: UpdateNetwork,
    ) -> AppResult<Network> {
        let network = self.find(network_id).await?;
        self.access
            .require_network(ctx.user_id, &network, NetworkAction::Manage, ctx.request_time)
            .await?;

        let settings = network.merged_settings(&update);
        settings.validate()?;

        let source_device_id = match update.source_device_id {
            Some(device_id) if device_id != network.source_device_id => {
                self.require_own_device(network.owner_id, device_id).await?;
                device_id
            }
            _ => network.source_device_id,
        };
        let is_active = update.is_active.unwrap_or(network.is_active);

        let updated = self
            .networks
            .update(network.id, &settings, source_device_id, is_active)
            .await?;

        info!(user_id = %ctx.user_id, network_id = %network.id, "Network updated");
        Ok(updated)
    }

    /// Deletes a network. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, network_id: Uuid) -> AppResult<()> {
        let network = self.find(network_id).await?;
        self.access
            .require_network(ctx.user_id, &network, NetworkAction::Administer, ctx.request_time)
            .await?;
        self.networks.delete(network.id).await?;
        info!(user_id = %ctx.user_id, network_id = %network.id, "Network deleted");
        Ok(())
    }

    /// Reveals SSID and password. Requires connect access.
    pub async fn credentials(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
    ) -> AppResult<NetworkCredentials> {
        let network = self.find(network_id).await?;
        self.access
            .require_network(
                ctx.user_id,
                &network,
                NetworkAction::ReadCredentials,
                ctx.request_time,
            )
            .await?;

        info!(user_id = %ctx.user_id, network_id = %network.id, "Network credentials read");
        Ok(NetworkCredentials {
            network_id: network.id,
            network_name: network.network_name,
            password: network.password,
            security_type: network.security_type,
        })
    }

    /// Usage statistics. Requires manage access.
    pub async fn stats(&self, ctx: &RequestContext, network_id: Uuid) -> AppResult<NetworkStats> {
        let network = self.find(network_id).await?;
        self.access
            .require_network(ctx.user_id, &network, NetworkAction::Manage, ctx.request_time)
            .await?;
        self.networks.stats(&network).await
    }

    async fn find(&self, network_id: Uuid) -> AppResult<Network> {
        self.networks
            .find_by_id(network_id)
            .await?
            .ok_or_else(|| AppError::not_found("Network not found"))
    }

    async fn require_own_device(&self, owner_id: Uuid, device_id: Uuid) -> AppResult<()> {
        match self.devices.find_owned(device_id, owner_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::field(
                "source_device_id",
                "Source device must be one of the owner's devices",
            )),
        }
    }
}
