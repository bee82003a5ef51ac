//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use netshare_core::config::AppConfig;
use netshare_core::error::AppError;
use netshare_database::repositories::{DeviceRepository, NetworkRepository, UserRepository};
use netshare_entity::user::{CreateUser, User};
use netshare_service::UserService;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Provision a new user
    Create {
        /// Unique login name
        username: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Display name
        #[arg(long)]
        display_name: Option<String>,
    },
    /// List all users
    List,
    /// Delete a user with their devices, networks, and files
    Delete {
        /// Username or user ID
        user: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    display_name: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone().unwrap_or_default(),
            display_name: u.display_name.clone().unwrap_or_default(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let users = UserService::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(DeviceRepository::new(pool.clone())),
        Arc::new(NetworkRepository::new(pool)),
    );

    match &args.command {
        UserCommand::Create {
            username,
            email,
            display_name,
        } => {
            let user = users
                .create(CreateUser {
                    username: username.clone(),
                    email: email.clone(),
                    display_name: display_name.clone(),
                })
                .await?;
            output::print_item(&UserRow::from(&user), format);
        }
        UserCommand::List => {
            let rows: Vec<UserRow> = users.list_all().await?.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Delete { user, force } => {
            let target = resolve_user(&users, user).await?;

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete user '{}' and everything they own?",
                        target.username
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            users.delete(target.id).await?;
            output::print_success(&format!("User '{}' deleted", target.username));
        }
    }

    Ok(())
}

/// Look a user up by ID when the argument parses as one, by username otherwise.
pub(crate) async fn resolve_user(users: &UserService, key: &str) -> Result<User, AppError> {
    let found = match Uuid::parse_str(key) {
        Ok(id) => users.find(id).await?,
        Err(_) => users.find_by_username(key).await?,
    };
    found.ok_or_else(|| AppError::not_found(format!("User '{key}' not found")))
}
