//! Connection repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use netshare_core::error::{AppError, ErrorKind};
use netshare_core::result::AppResult;
use netshare_entity::connection::{Connection, ConnectionDetail, CreateConnection, UsageReport};

const DETAIL_SELECT: &str = "SELECT c.id, c.network_id, n.network_name, c.device_id, d.device_name, \
     d.user_id AS device_owner_id, c.is_connected, c.connection_quality, c.data_used, \
     c.connected_at, c.last_activity \
     FROM connections c \
     JOIN networks n ON n.id = c.network_id \
     JOIN devices d ON d.id = c.device_id";

/// Repository for device-to-network connections.
#[derive(Debug, Clone)]
pub struct ConnectionRepository {
    pool: PgPool,
}

impl ConnectionRepository {
    /// Create a new connection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a connection by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Connection>> {
        sqlx::query_as::<_, Connection>("SELECT * FROM connections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find connection", e))
    }

    /// List connections on a network with device names.
    pub async fn list_by_network(&self, network_id: Uuid) -> AppResult<Vec<ConnectionDetail>> {
        sqlx::query_as::<_, ConnectionDetail>(&format!(
            "{DETAIL_SELECT} WHERE c.network_id = $1 ORDER BY c.connected_at DESC"
        ))
        .bind(network_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list connections", e))
    }

    /// List connections of a device with network names.
    pub async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<ConnectionDetail>> {
        sqlx::query_as::<_, ConnectionDetail>(&format!(
            "{DETAIL_SELECT} WHERE c.device_id = $1 ORDER BY c.connected_at DESC"
        ))
        .bind(device_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list connections", e))
    }

    /// Count live connections across every network owned by a user.
    pub async fn count_connected_for_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM connections c JOIN networks n ON n.id = c.network_id \
             WHERE n.owner_id = $1 AND c.is_connected",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count connections", e))
    }

    /// Attach a device to a network, or mark an existing attachment connected.
    ///
    /// Runs in a transaction holding a row lock on the network so concurrent
    /// connects cannot push the network past `max_devices`.
    pub async fn connect(&self, data: &CreateConnection) -> AppResult<Connection> {
        let db_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to connect device", e);

        let mut tx = self.pool.begin().await.map_err(db_err)?;
        reserve_slot(&mut *tx, data.network_id, data.device_id).await?;

        let connection = sqlx::query_as::<_, Connection>(
            "INSERT INTO connections (network_id, device_id) VALUES ($1, $2) \
             ON CONFLICT (network_id, device_id) \
             DO UPDATE SET is_connected = TRUE, last_activity = NOW() \
             RETURNING *",
        )
        .bind(data.network_id)
        .bind(data.device_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(connection)
    }

    /// Record reported usage and touch `last_activity`.
    ///
    /// Moving a disconnected row back to connected takes the same network
    /// lock and limit check as [`Self::connect`].
    pub async fn record_usage(&self, id: Uuid, report: &UsageReport) -> AppResult<Connection> {
        let db_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to record usage", e);

        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Connection not found"))?;

        let mut tx = self.pool.begin().await.map_err(db_err)?;
        if report.is_connected == Some(true) && !current.is_connected {
            reserve_slot(&mut *tx, current.network_id, current.device_id).await?;
        }

        let connection = sqlx::query_as::<_, Connection>(
            "UPDATE connections SET \
                connection_quality = COALESCE($2, connection_quality), \
                data_used = data_used + COALESCE($3, 0), \
                is_connected = COALESCE($4, is_connected), \
                last_activity = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(report.connection_quality)
        .bind(report.data_used_delta)
        .bind(report.is_connected)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?
        .ok_or_else(|| AppError::not_found("Connection not found"))?;

        tx.commit().await.map_err(db_err)?;
        Ok(connection)
    }

    /// Remove a connection.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM connections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete connection", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

/// Lock the network row and check that `device_id` may be connected to it.
///
/// The network must be active and have fewer than `max_devices` other
/// devices connected. The lock is held until the transaction ends.
async fn reserve_slot(
    conn: &mut PgConnection,
    network_id: Uuid,
    device_id: Uuid,
) -> AppResult<()> {
    let db_err = |e: sqlx::Error| {
        AppError::with_source(ErrorKind::Database, "Failed to check network capacity", e)
    };

    let (max_devices, is_active): (i32, bool) = sqlx::query_as(
        "SELECT max_devices, is_active FROM networks WHERE id = $1 FOR UPDATE",
    )
    .bind(network_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_err)?
    .ok_or_else(|| AppError::not_found("Network not found"))?;

    if !is_active {
        return Err(AppError::conflict("Network is not active"));
    }

    let connected: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM connections \
         WHERE network_id = $1 AND is_connected AND device_id <> $2",
    )
    .bind(network_id)
    .bind(device_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(db_err)?;

    if connected >= i64::from(max_devices) {
        return Err(AppError::conflict(format!(
            "Network has reached its limit of {max_devices} devices"
        )));
    }
    Ok(())
}
