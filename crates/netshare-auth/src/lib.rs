//! # netshare-auth
//!
//! Identity and authorization for NetShare.
//!
//! ## Modules
//!
//! - `jwt`: bearer token claims, verification, and issuing for tooling
//! - `access`: who may do what to a network or file, given ownership,
//!   public flags, and share records

pub mod access;
pub mod jwt;

pub use access::{AccessChecker, AccessGrant, FileAction, NetworkAction};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
