//! Repository implementations for all NetShare entities.

pub mod comment;
pub mod connection;
pub mod device;
pub mod file;
pub mod file_share;
pub mod invitation;
pub mod network;
pub mod network_share;
pub mod user;

pub use comment::CommentRepository;
pub use connection::ConnectionRepository;
pub use device::DeviceRepository;
pub use file::FileRepository;
pub use file_share::FileShareRepository;
pub use invitation::InvitationRepository;
pub use network::NetworkRepository;
pub use network_share::NetworkShareRepository;
pub use user::UserRepository;
