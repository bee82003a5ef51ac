//! # netshare-service
//!
//! Business logic service layer for NetShare. Each service loads rows
//! through the repositories, applies the access checks, and performs the
//! state change for one aggregate.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod device;
pub mod file;
pub mod invitation;
pub mod network;
pub mod share;
pub mod user;

pub use context::RequestContext;
pub use device::DeviceService;
pub use file::{CommentService, FileService};
pub use invitation::InvitationService;
pub use network::{ConnectionService, NetworkService};
pub use share::{FileShareService, NetworkShareService};
pub use user::{DashboardService, UserService};
