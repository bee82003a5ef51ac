//! Network invitations.

pub mod service;

pub use service::{InvitationService, NewInvitation};
