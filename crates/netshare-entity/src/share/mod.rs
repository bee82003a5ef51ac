//! Network and file shares, and the permission levels they grant.

pub mod file;
pub mod grant;
pub mod level;
pub mod network;

pub use file::{CreateFileShare, FileShare, FileShareDetail};
pub use grant::ShareGrant;
pub use level::{FilePermission, NetworkPermission, PermissionLevel};
pub use network::{CreateNetworkShare, NetworkShare, NetworkShareDetail, UpdateShare};
