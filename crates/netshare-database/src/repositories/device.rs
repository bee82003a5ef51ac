//! Device repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use netshare_core::error::{AppError, ErrorKind};
use netshare_core::result::AppResult;
use netshare_entity::device::{CreateDevice, Device, UpdateDevice};

use crate::error::write_error;

const MAC_TAKEN: &str = "A device with this MAC address is already registered";

/// Repository for device CRUD and status updates.
#[derive(Debug, Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    /// Create a new device repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a device by ID regardless of owner.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Device>> {
        sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find device", e))
    }

    /// Find a device only if `user_id` owns it.
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Device>> {
        sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find device", e))
    }

    /// List a user's devices, newest first.
    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Device>> {
        sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list devices", e))
    }

    /// The `limit` most recently registered devices of a user.
    pub async fn recent_by_user(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<Device>> {
        sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list devices", e))
    }

    /// Count a user's devices.
    pub async fn count_by_user(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM devices WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count devices", e))
    }

    /// Register a device.
    pub async fn create(&self, data: &CreateDevice) -> AppResult<Device> {
        sqlx::query_as::<_, Device>(
            "INSERT INTO devices (user_id, device_name, device_type, mac_address, ip_address) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.device_name)
        .bind(data.device_type)
        .bind(data.mac_address.as_str())
        .bind(&data.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to create device", MAC_TAKEN))
    }

    /// Apply a partial update; absent fields keep their values.
    pub async fn update(&self, id: Uuid, data: &UpdateDevice) -> AppResult<Device> {
        sqlx::query_as::<_, Device>(
            "UPDATE devices SET \
                device_name = COALESCE($2, device_name), \
                device_type = COALESCE($3, device_type), \
                mac_address = COALESCE($4, mac_address), \
                ip_address = COALESCE($5, ip_address) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.device_name)
        .bind(data.device_type)
        .bind(data.mac_address.as_ref().map(|m| m.as_str()))
        .bind(&data.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to update device", MAC_TAKEN))
    }

    /// Set the online flag and touch `last_seen`.
    pub async fn set_online(&self, id: Uuid, is_online: bool) -> AppResult<Device> {
        sqlx::query_as::<_, Device>(
            "UPDATE devices SET is_online = $2, last_seen = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_online)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update device status", e)
        })
    }

    /// Delete a device.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete device", e))?;
        Ok(result.rows_affected() > 0)
    }
}
