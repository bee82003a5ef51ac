//! User service.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{DeviceRepository, NetworkRepository, UserRepository};
use netshare_entity::user::{CreateUser, User, UserSummary};

use crate::context::RequestContext;

/// Profiles for API callers and account administration for the CLI.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    devices: Arc<DeviceRepository>,
    networks: Arc<NetworkRepository>,
}

/// The caller's profile.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    /// The user row.
    #[serde(flatten)]
    pub user: User,
    /// Number of registered devices.
    pub device_count: i64,
    /// Number of owned networks.
    pub network_count: i64,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        devices: Arc<DeviceRepository>,
        networks: Arc<NetworkRepository>,
    ) -> Self {
        Self {
            users,
            devices,
            networks,
        }
    }

    /// The caller's profile with device and network counts.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<Profile> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let device_count = self.devices.count_by_user(user.id).await?;
        let network_count = self.networks.count_by_owner(user.id).await?;
        Ok(Profile {
            user,
            device_count,
            network_count,
        })
    }

    /// Everyone except the caller, as share and invitation targets.
    pub async fn list_others(&self, ctx: &RequestContext) -> AppResult<Vec<UserSummary>> {
        self.users.list_others(ctx.user_id).await
    }

    /// Looks a user up by ID.
    pub async fn find(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(user_id).await
    }

    /// Looks a user up by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.users.find_by_username(username).await
    }

    /// Lists all users.
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        self.users.list_all().await
    }

    /// Provisions a user. Usernames are unique.
    pub async fn create(&self, req: CreateUser) -> AppResult<User> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(AppError::field("username", "Username is required"));
        }
        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                ..req
            })
            .await?;
        info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Deletes a user and everything they own.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        if !self.users.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(%user_id, "User deleted");
        Ok(())
    }
}
