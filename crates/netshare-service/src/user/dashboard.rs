//! Dashboard overview for the caller.

use std::sync::Arc;

use serde::Serialize;

use netshare_core::result::AppResult;
use netshare_database::repositories::{
    ConnectionRepository, DeviceRepository, InvitationRepository, NetworkRepository,
    NetworkShareRepository,
};
use netshare_entity::device::Device;
use netshare_entity::invitation::InvitationDetail;
use netshare_entity::network::Network;

use crate::context::RequestContext;

const RECENT_LIMIT: i64 = 5;

/// Aggregates counts and recent rows for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardService {
    devices: Arc<DeviceRepository>,
    networks: Arc<NetworkRepository>,
    connections: Arc<ConnectionRepository>,
    network_shares: Arc<NetworkShareRepository>,
    invitations: Arc<InvitationRepository>,
}

/// Counts and the most recent items for the caller.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub device_count: i64,
    pub network_count: i64,
    /// Network shares granted to the caller that are active and unexpired.
    pub shared_with_me_count: i64,
    /// Connected devices across the caller's networks.
    pub active_connections: i64,
    pub pending_invitation_count: i64,
    pub recent_networks: Vec<Network>,
    pub recent_devices: Vec<Device>,
    pub pending_invitations: Vec<InvitationDetail>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(
        devices: Arc<DeviceRepository>,
        networks: Arc<NetworkRepository>,
        connections: Arc<ConnectionRepository>,
        network_shares: Arc<NetworkShareRepository>,
        invitations: Arc<InvitationRepository>,
    ) -> Self {
        Self {
            devices,
            networks,
            connections,
            network_shares,
            invitations,
        }
    }

    /// Builds the overview.
    pub async fn overview(&self, ctx: &RequestContext) -> AppResult<Dashboard> {
        let user_id = ctx.user_id;
        let (device_count, network_count, shared_with_me_count, active_connections) = tokio::try_join!(
            self.devices.count_by_user(user_id),
            self.networks.count_by_owner(user_id),
            self.network_shares
                .count_effective_for_user(user_id, ctx.request_time),
            self.connections.count_connected_for_owner(user_id),
        )?;
        let (pending_invitation_count, recent_networks, recent_devices, pending_invitations) = tokio::try_join!(
            self.invitations.count_pending_for_user(user_id),
            self.networks.recent_by_owner(user_id, RECENT_LIMIT),
            self.devices.recent_by_user(user_id, RECENT_LIMIT),
            self.invitations
                .list_pending_for_user(user_id, Some(RECENT_LIMIT)),
        )?;

        Ok(Dashboard {
            device_count,
            network_count,
            shared_with_me_count,
            active_connections,
            pending_invitation_count,
            recent_networks,
            recent_devices,
            pending_invitations,
        })
    }
}
