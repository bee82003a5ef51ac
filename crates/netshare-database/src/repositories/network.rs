//! Network repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use netshare_core::error::{AppError, ErrorKind};
use netshare_core::result::AppResult;
use netshare_entity::network::{CreateNetwork, Network, NetworkSettings, NetworkStats};

use crate::error::write_error;

const NAME_TAKEN: &str = "You already have a network with this name";

/// Repository for network CRUD and usage aggregation.
#[derive(Debug, Clone)]
pub struct NetworkRepository {
    pool: PgPool,
}

impl NetworkRepository {
    /// Create a new network repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a network by ID regardless of owner.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Network>> {
        sqlx::query_as::<_, Network>("SELECT * FROM networks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find network", e))
    }

    /// List a user's networks, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Network>> {
        sqlx::query_as::<_, Network>(
            "SELECT * FROM networks WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list networks", e))
    }

    /// The `limit` most recently created networks of a user.
    pub async fn recent_by_owner(&self, owner_id: Uuid, limit: i64) -> AppResult<Vec<Network>> {
        sqlx::query_as::<_, Network>(
            "SELECT * FROM networks WHERE owner_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list networks", e))
    }

    /// Count a user's networks.
    pub async fn count_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM networks WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count networks", e))
    }

    /// Create a network from validated settings.
    pub async fn create(&self, data: &CreateNetwork) -> AppResult<Network> {
        let s = &data.settings;
        sqlx::query_as::<_, Network>(
            "INSERT INTO networks (owner_id, source_device_id, network_name, password, \
             security_type, frequency_band, channel, signal_strength, max_devices) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(data.source_device_id)
        .bind(s.stored_name())
        .bind(s.stored_password())
        .bind(s.security_type)
        .bind(s.frequency_band)
        .bind(s.channel)
        .bind(s.signal_strength)
        .bind(s.max_devices)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to create network", NAME_TAKEN))
    }

    /// Overwrite the settings of a network.
    pub async fn update(
        &self,
        id: Uuid,
        settings: &NetworkSettings,
        source_device_id: Uuid,
        is_active: bool,
    ) -> AppResult<Network> {
        sqlx::query_as::<_, Network>(
            "UPDATE networks SET network_name = $2, password = $3, security_type = $4, \
             frequency_band = $5, channel = $6, signal_strength = $7, max_devices = $8, \
             source_device_id = $9, is_active = $10, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(settings.stored_name())
        .bind(settings.stored_password())
        .bind(settings.security_type)
        .bind(settings.frequency_band)
        .bind(settings.channel)
        .bind(settings.signal_strength)
        .bind(settings.max_devices)
        .bind(source_device_id)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to update network", NAME_TAKEN))
    }

    /// Delete a network; shares, invitations and connections cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM networks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete network", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Aggregate connection usage for a network.
    pub async fn stats(&self, network: &Network) -> AppResult<NetworkStats> {
        let (connected_devices, total_data_used): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE is_connected), COALESCE(SUM(data_used), 0)::BIGINT \
             FROM connections WHERE network_id = $1",
        )
        .bind(network.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate network usage", e)
        })?;

        Ok(NetworkStats {
            network_name: network.network_name.clone(),
            is_active: network.is_active,
            connected_devices,
            max_devices: network.max_devices,
            total_data_used,
            signal_strength: network.signal_strength,
            channel: network.channel,
            frequency_band: network.frequency_band,
        })
    }
}
