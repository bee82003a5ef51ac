//! Network invitation repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use netshare_core::error::{AppError, ErrorKind};
use netshare_core::result::AppResult;
use netshare_entity::invitation::{
    CreateInvitation, InvitationDetail, InvitationStatus, NetworkInvitation,
};
use netshare_entity::share::NetworkPermission;

use crate::error::write_error;

const DETAIL_SELECT: &str = "SELECT i.id, i.network_id, n.network_name, i.invited_user_id, \
     iu.username AS invited_username, i.invited_by_id, ib.username AS invited_by_username, \
     i.status, i.created_at, i.expires_at, i.responded_at \
     FROM network_invitations i \
     JOIN networks n ON n.id = i.network_id \
     JOIN users iu ON iu.id = i.invited_user_id \
     JOIN users ib ON ib.id = i.invited_by_id";

/// Repository for invitations and their status transitions.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an invitation addressed to `user_id`.
    pub async fn find_for_invitee(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<NetworkInvitation>> {
        sqlx::query_as::<_, NetworkInvitation>(
            "SELECT * FROM network_invitations WHERE id = $1 AND invited_user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invitation", e))
    }

    /// Pending invitations addressed to a user, newest first.
    pub async fn list_pending_for_user(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<InvitationDetail>> {
        sqlx::query_as::<_, InvitationDetail>(&format!(
            "{DETAIL_SELECT} WHERE i.invited_user_id = $1 AND i.status = 'pending' \
             ORDER BY i.created_at DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invitations", e))
    }

    /// Pending invitations sent for a network.
    pub async fn list_pending_for_network(
        &self,
        network_id: Uuid,
    ) -> AppResult<Vec<InvitationDetail>> {
        sqlx::query_as::<_, InvitationDetail>(&format!(
            "{DETAIL_SELECT} WHERE i.network_id = $1 AND i.status = 'pending' \
             ORDER BY i.created_at DESC"
        ))
        .bind(network_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invitations", e))
    }

    /// Count pending invitations addressed to a user.
    pub async fn count_pending_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM network_invitations \
             WHERE invited_user_id = $1 AND status = 'pending'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count invitations", e))
    }

    /// Send an invitation; one per (network, user) pair.
    pub async fn create(&self, data: &CreateInvitation) -> AppResult<NetworkInvitation> {
        sqlx::query_as::<_, NetworkInvitation>(
            "INSERT INTO network_invitations (network_id, invited_user_id, invited_by_id, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.network_id)
        .bind(data.invited_user_id)
        .bind(data.invited_by_id)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(
            "Failed to create invitation",
            "This user has already been invited to the network",
        ))
    }

    /// Move a pending invitation to `status`.
    ///
    /// The update is conditional on the row still being pending; `None`
    /// means another request responded first.
    pub async fn transition(
        &self,
        id: Uuid,
        status: InvitationStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<NetworkInvitation>> {
        sqlx::query_as::<_, NetworkInvitation>(
            "UPDATE network_invitations SET status = $2, responded_at = $3 \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(responded_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update invitation", e))
    }

    /// Accept a pending invitation and grant the invitee a connect share.
    ///
    /// Both writes happen in one transaction. An existing share for the
    /// pair is left untouched. Returns `None` when the invitation was no
    /// longer pending.
    pub async fn accept(
        &self,
        invitation: &NetworkInvitation,
        now: DateTime<Utc>,
    ) -> AppResult<Option<NetworkInvitation>> {
        let db_err = |e: sqlx::Error| {
            AppError::with_source(ErrorKind::Database, "Failed to accept invitation", e)
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let accepted = sqlx::query_as::<_, NetworkInvitation>(
            "UPDATE network_invitations SET status = 'accepted', responded_at = $2 \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(invitation.id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        let Some(accepted) = accepted else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO network_shares (network_id, shared_with_id, permission_level) \
             VALUES ($1, $2, $3) ON CONFLICT (network_id, shared_with_id) DO NOTHING",
        )
        .bind(accepted.network_id)
        .bind(accepted.invited_user_id)
        .bind(NetworkPermission::Connect)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(Some(accepted))
    }
}
