//! # netshare-entity
//!
//! Domain entity models for NetShare. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! The rules that decide sharing outcomes (permission ordering, share
//! expiry, the invitation state machine, upload classification) live next
//! to the types they operate on and are pure functions of their inputs.

pub mod comment;
pub mod connection;
pub mod device;
pub mod file;
pub mod invitation;
pub mod network;
pub mod share;
pub mod user;
