//! Bearer token commands.
//!
//! NetShare has no login endpoint; operators mint tokens here and hand them
//! to clients.

use std::sync::Arc;

use chrono::Duration;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use netshare_auth::JwtEncoder;
use netshare_core::config::AppConfig;
use netshare_core::error::AppError;
use netshare_database::repositories::{DeviceRepository, NetworkRepository, UserRepository};
use netshare_service::UserService;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a bearer token for a user
    Issue {
        /// Username or user ID
        user: String,
        /// Lifetime in minutes (defaults to the configured TTL)
        #[arg(long)]
        ttl_minutes: Option<i64>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    user_id: String,
    username: String,
    expires_at: String,
    token: String,
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { user, ttl_minutes } => {
            let pool = super::create_db_pool(config).await?;
            let users = UserService::new(
                Arc::new(UserRepository::new(pool.clone())),
                Arc::new(DeviceRepository::new(pool.clone())),
                Arc::new(NetworkRepository::new(pool)),
            );
            let target = super::user::resolve_user(&users, user).await?;

            let encoder = JwtEncoder::new(&config.auth);
            let issued = match ttl_minutes {
                Some(minutes) if *minutes <= 0 => {
                    return Err(AppError::field("ttl_minutes", "Lifetime must be positive"));
                }
                Some(minutes) => {
                    encoder.issue_with_ttl(target.id, &target.username, Duration::minutes(*minutes))?
                }
                None => encoder.issue(target.id, &target.username)?,
            };

            let row = TokenRow {
                user_id: target.id.to_string(),
                username: target.username,
                expires_at: issued.expires_at.to_rfc3339(),
                token: issued.token,
            };
            output::print_item(&row, format);
        }
    }

    Ok(())
}
