//! # netshare-core
//!
//! Core crate for NetShare. Contains the configuration schema, the storage
//! provider trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other NetShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
