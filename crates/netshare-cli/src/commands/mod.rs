//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod token;
pub mod user;

use clap::{Parser, Subcommand};
use sqlx::PgPool;

use crate::output::OutputFormat;
use netshare_core::config::AppConfig;
use netshare_core::error::AppError;
use netshare_database::DatabasePool;

/// NetShare: share WiFi networks and files with other users
#[derive(Debug, Parser)]
#[command(name = "netshare", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads `config/{env}.toml` over the defaults)
    #[arg(short, long, env = "NETSHARE_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the NetShare server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Bearer token issuing
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<PgPool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_create() {
        let cli = Cli::try_parse_from([
            "netshare",
            "--format",
            "json",
            "user",
            "create",
            "alice",
            "--email",
            "alice@example.com",
        ])
        .expect("parse");
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::User(user::UserArgs {
                command: user::UserCommand::Create { username, email, .. },
            }) => {
                assert_eq!(username, "alice");
                assert_eq!(email.as_deref(), Some("alice@example.com"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_token_issue_with_ttl() {
        let cli = Cli::try_parse_from(["netshare", "token", "issue", "bob", "--ttl-minutes", "5"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Commands::Token(token::TokenArgs {
                command: token::TokenCommand::Issue {
                    ttl_minutes: Some(5),
                    ..
                }
            })
        ));
    }
}
