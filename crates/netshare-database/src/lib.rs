//! # netshare-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all NetShare entities.

pub mod connection;
pub mod error;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
