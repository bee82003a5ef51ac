//! Permission resolution for networks and files.
//!
//! Resolution order:
//! 1. Owner check: owners may do everything.
//! 2. Owner-only actions stop here for everyone else.
//! 3. Public files grant view and download to anyone.
//! 4. Share check: an active, unexpired share at or above the required level.

pub mod checker;
pub mod policy;

pub use checker::AccessChecker;
pub use policy::{AccessGrant, FileAction, NetworkAction, resolve_file, resolve_network};
