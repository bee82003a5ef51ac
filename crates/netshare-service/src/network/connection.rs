//! Device connections to networks.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use netshare_auth::access::{AccessChecker, NetworkAction};
use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{ConnectionRepository, DeviceRepository, NetworkRepository};
use netshare_entity::connection::{
    Connection, ConnectionDetail, CreateConnection, QUALITY_RANGE, UsageReport,
};
use netshare_entity::network::Network;

use crate::context::RequestContext;

/// Attaches devices to networks and records their usage.
#[derive(Debug, Clone)]
pub struct ConnectionService {
    connections: Arc<ConnectionRepository>,
    networks: Arc<NetworkRepository>,
    devices: Arc<DeviceRepository>,
    access: Arc<AccessChecker>,
}

impl ConnectionService {
    /// Creates a new connection service.
    pub fn new(
        connections: Arc<ConnectionRepository>,
        networks: Arc<NetworkRepository>,
        devices: Arc<DeviceRepository>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            connections,
            networks,
            devices,
            access,
        }
    }

    /// Lists connections on a network. Requires manage access.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
    ) -> AppResult<Vec<ConnectionDetail>> {
        let network = self.find_network(network_id).await?;
        self.access
            .require_network(ctx.user_id, &network, NetworkAction::Manage, ctx.request_time)
            .await?;
        self.connections.list_by_network(network.id).await
    }

    /// Connects one of the caller's devices. Requires connect access; the
    /// network must be active and below its device limit.
    pub async fn connect(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
        device_id: Uuid,
    ) -> AppResult<Connection> {
        let network = self.find_network(network_id).await?;
        self.access
            .require_network(ctx.user_id, &network, NetworkAction::Connect, ctx.request_time)
            .await?;

        let device = self
            .devices
            .find_owned(device_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::field("device_id", "Select one of your own devices"))?;

        let connection = self
            .connections
            .connect(&CreateConnection {
                network_id: network.id,
                device_id: device.id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            network_id = %network.id,
            device_id = %device.id,
            connection_id = %connection.id,
            "Device connected"
        );

        Ok(connection)
    }

    /// Removes a connection. Allowed for the device owner and the network
    /// owner.
    pub async fn disconnect(
        &self,
        ctx: &RequestContext,
        network_id: Uuid,
        connection_id: Uuid,
    ) -> AppResult<()> {
        let network = self.find_network(network_id).await?;
        let connection = self
            .connections
            .find_by_id(connection_id)
            .await?
            .filter(|c| c.network_id == network.id)
            .ok_or_else(|| AppError::not_found("Connection not found"))?;

        let owns_device = self
            .devices
            .find_owned(connection.device_id, ctx.user_id)
            .await?
            .is_some();
        if !owns_device && !network.is_owned_by(ctx.user_id) {
            return Err(AppError::authorization(
                "Only the device owner or the network owner can disconnect",
            ));
        }

        self.connections.delete(connection.id).await?;
        info!(
            user_id = %ctx.user_id,
            network_id = %network.id,
            connection_id = %connection.id,
            "Device disconnected"
        );
        Ok(())
    }

    /// Records reported quality, data usage and link state.
    ///
    /// Only the device owner may report, and only while they still hold
    /// connect access to the network. Reconnecting goes through the
    /// network's active flag and device limit.
    pub async fn report_usage(
        &self,
        ctx: &RequestContext,
        connection_id: Uuid,
        report: UsageReport,
    ) -> AppResult<Connection> {
        let connection = self
            .connections
            .find_by_id(connection_id)
            .await?
            .ok_or_else(|| AppError::not_found("Connection not found"))?;

        if self
            .devices
            .find_owned(connection.device_id, ctx.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::authorization(
                "Only the device owner can report usage",
            ));
        }

        let network = self.find_network(connection.network_id).await?;
        self.access
            .require_network(
                ctx.user_id,
                &network,
                NetworkAction::Connect,
                ctx.request_time,
            )
            .await?;

        validate_usage(&report)?;
        self.connections.record_usage(connection.id, &report).await
    }

    async fn find_network(&self, network_id: Uuid) -> AppResult<Network> {
        self.networks
            .find_by_id(network_id)
            .await?
            .ok_or_else(|| AppError::not_found("Network not found"))
    }
}

fn validate_usage(report: &UsageReport) -> AppResult<()> {
    let mut errors = Vec::new();
    if report
        .connection_quality
        .is_some_and(|q| !QUALITY_RANGE.contains(&q))
    {
        errors.push((
            "connection_quality".to_string(),
            "Connection quality must be between 0 and 100".to_string(),
        ));
    }
    if report.data_used_delta.is_some_and(|d| d < 0) {
        errors.push((
            "data_used_delta".to_string(),
            "Data used cannot decrease".to_string(),
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::fields("Invalid usage report", errors))
    }
}

#[cfg(test)]
mod tests {
    use netshare_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_usage_ranges() {
        let ok = UsageReport {
            connection_quality: Some(100),
            data_used_delta: Some(0),
            is_connected: None,
        };
        assert!(validate_usage(&ok).is_ok());

        let bad = UsageReport {
            connection_quality: Some(101),
            data_used_delta: Some(-1),
            is_connected: Some(true),
        };
        let err = validate_usage(&bad).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let details = err.details.expect("details");
        assert!(details.get("connection_quality").is_some());
        assert!(details.get("data_used_delta").is_some());
    }
}
