//! Device CRUD service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{ConnectionRepository, DeviceRepository};
use netshare_entity::connection::ConnectionDetail;
use netshare_entity::device::{CreateDevice, Device, DeviceType, MacAddress, UpdateDevice};

use crate::context::RequestContext;

/// Manages the caller's devices.
#[derive(Debug, Clone)]
pub struct DeviceService {
    /// Device repository.
    devices: Arc<DeviceRepository>,
    /// Connection repository.
    connections: Arc<ConnectionRepository>,
}

/// Input for registering a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDevice {
    /// Display name.
    pub device_name: String,
    /// Kind of device.
    pub device_type: DeviceType,
    /// MAC address as typed by the user.
    pub mac_address: String,
    /// Last known IP address.
    pub ip_address: Option<String>,
}

/// Partial changes to a device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceChanges {
    /// New display name.
    pub device_name: Option<String>,
    /// New kind.
    pub device_type: Option<DeviceType>,
    /// New MAC address as typed by the user.
    pub mac_address: Option<String>,
    /// New IP address.
    pub ip_address: Option<String>,
}

/// A device together with the networks it is attached to.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceDetail {
    /// The device row.
    #[serde(flatten)]
    pub device: Device,
    /// Its connections, newest first.
    pub connections: Vec<ConnectionDetail>,
}

/// Status payload for a device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceStatus {
    /// Device identifier.
    pub device_id: Uuid,
    /// Display name.
    pub device_name: String,
    /// Online flag.
    pub is_online: bool,
    /// Last time the device reported in.
    pub last_seen: DateTime<Utc>,
    /// Last known IP address.
    pub ip_address: Option<String>,
}

impl From<Device> for DeviceStatus {
    fn from(device: Device) -> Self {
        Self {
            device_id: device.id,
            device_name: device.device_name,
            is_online: device.is_online,
            last_seen: device.last_seen,
            ip_address: device.ip_address,
        }
    }
}

impl DeviceService {
    /// Creates a new device service.
    pub fn new(devices: Arc<DeviceRepository>, connections: Arc<ConnectionRepository>) -> Self {
        Self {
            devices,
            connections,
        }
    }

    /// Lists the caller's devices, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Device>> {
        self.devices.list_by_user(ctx.user_id).await
    }

    /// Registers a device for the caller.
    ///
    /// The MAC address is normalized to upper case; a MAC already registered
    /// by anyone is a conflict.
    pub async fn register(&self, ctx: &RequestContext, req: RegisterDevice) -> AppResult<Device> {
        let mac_address = MacAddress::parse(&req.mac_address)?;

        let device = self
            .devices
            .create(&CreateDevice {
                user_id: ctx.user_id,
                device_name: req.device_name,
                device_type: req.device_type,
                mac_address,
                ip_address: req.ip_address,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            device_id = %device.id,
            mac_address = %device.mac_address,
            "Device registered"
        );

        Ok(device)
    }

    /// Fetches one of the caller's devices with its connections.
    pub async fn get(&self, ctx: &RequestContext, device_id: Uuid) -> AppResult<DeviceDetail> {
        let device = self.owned(ctx, device_id).await?;
        let connections = self.connections.list_by_device(device.id).await?;
        Ok(DeviceDetail {
            device,
            connections,
        })
    }

    /// Applies partial changes to one of the caller's devices.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        device_id: Uuid,
        changes: DeviceChanges,
    ) -> AppResult<Device> {
        let device = self.owned(ctx, device_id).await?;
        let mac_address = changes
            .mac_address
            .as_deref()
            .map(MacAddress::parse)
            .transpose()?;

        let device = self
            .devices
            .update(
                device.id,
                &UpdateDevice {
                    device_name: changes.device_name,
                    device_type: changes.device_type,
                    mac_address,
                    ip_address: changes.ip_address,
                },
            )
            .await?;

        info!(user_id = %ctx.user_id, device_id = %device.id, "Device updated");
        Ok(device)
    }

    /// Reads the status of one of the caller's devices.
    pub async fn status(&self, ctx: &RequestContext, device_id: Uuid) -> AppResult<DeviceStatus> {
        self.owned(ctx, device_id).await.map(DeviceStatus::from)
    }

    /// Sets the online flag and touches `last_seen`.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        device_id: Uuid,
        is_online: bool,
    ) -> AppResult<DeviceStatus> {
        let device = self.owned(ctx, device_id).await?;
        let device = self.devices.set_online(device.id, is_online).await?;
        info!(user_id = %ctx.user_id, device_id = %device.id, is_online, "Device status changed");
        Ok(device.into())
    }

    /// Deletes one of the caller's devices. Networks it broadcasts and its
    /// connections go with it.
    pub async fn delete(&self, ctx: &RequestContext, device_id: Uuid) -> AppResult<()> {
        let device = self.owned(ctx, device_id).await?;
        self.devices.delete(device.id).await?;
        info!(user_id = %ctx.user_id, device_id = %device.id, "Device deleted");
        Ok(())
    }

    async fn owned(&self, ctx: &RequestContext, device_id: Uuid) -> AppResult<Device> {
        self.devices
            .find_owned(device_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Device not found"))
    }
}
