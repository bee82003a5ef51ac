//! Granting, updating, and revoking shares of networks and files.

pub mod file;
pub mod network;
pub(crate) mod recipient;

pub use file::FileShareService;
pub use network::NetworkShareService;
pub use recipient::NewShare;
