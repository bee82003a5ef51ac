//! Database-backed access checks.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{FileShareRepository, NetworkShareRepository};
use netshare_entity::file::File;
use netshare_entity::network::Network;

use super::policy::{AccessGrant, FileAction, NetworkAction, resolve_file, resolve_network};

/// Loads the caller's share row when needed and applies the policy.
#[derive(Debug, Clone)]
pub struct AccessChecker {
    network_shares: Arc<NetworkShareRepository>,
    file_shares: Arc<FileShareRepository>,
}

impl AccessChecker {
    /// Creates a new access checker.
    pub fn new(
        network_shares: Arc<NetworkShareRepository>,
        file_shares: Arc<FileShareRepository>,
    ) -> Self {
        Self {
            network_shares,
            file_shares,
        }
    }

    /// Decide a network action for `user_id`, judging share expiry at `now`.
    pub async fn network(
        &self,
        user_id: Uuid,
        network: &Network,
        action: NetworkAction,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AccessGrant>> {
        if network.is_owned_by(user_id) {
            return Ok(Some(AccessGrant::Owner));
        }
        if action.required_level().is_none() {
            return Ok(None);
        }
        let share = self.network_shares.find_for_user(network.id, user_id).await?;
        Ok(resolve_network(
            user_id,
            network,
            share.as_ref(),
            action,
            now,
        ))
    }

    /// Like [`Self::network`] but fails with an authorization error on denial.
    pub async fn require_network(
        &self,
        user_id: Uuid,
        network: &Network,
        action: NetworkAction,
        now: DateTime<Utc>,
    ) -> AppResult<AccessGrant> {
        match self.network(user_id, network, action, now).await? {
            Some(grant) => Ok(grant),
            None => {
                debug!(%user_id, network_id = %network.id, ?action, "Network access denied");
                Err(AppError::authorization(denial_message(
                    action == NetworkAction::Administer,
                    "network",
                )))
            }
        }
    }

    /// Decide a file action for `user_id`, judging share expiry at `now`.
    pub async fn file(
        &self,
        user_id: Uuid,
        file: &File,
        action: FileAction,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AccessGrant>> {
        if file.is_owned_by(user_id) {
            return Ok(Some(AccessGrant::Owner));
        }
        if action.required_level().is_none() {
            return Ok(None);
        }
        if file.is_public {
            return Ok(Some(AccessGrant::Public));
        }
        let share = self.file_shares.find_for_user(file.id, user_id).await?;
        Ok(resolve_file(user_id, file, share.as_ref(), action, now))
    }

    /// Like [`Self::file`] but fails with an authorization error on denial.
    pub async fn require_file(
        &self,
        user_id: Uuid,
        file: &File,
        action: FileAction,
        now: DateTime<Utc>,
    ) -> AppResult<AccessGrant> {
        match self.file(user_id, file, action, now).await? {
            Some(grant) => Ok(grant),
            None => {
                debug!(%user_id, file_id = %file.id, ?action, "File access denied");
                Err(AppError::authorization(denial_message(
                    action == FileAction::Administer,
                    "file",
                )))
            }
        }
    }
}

fn denial_message(owner_only: bool, noun: &str) -> String {
    if owner_only {
        format!("Only the owner can do this to the {noun}")
    } else {
        format!("You do not have permission to access this {noun}")
    }
}
