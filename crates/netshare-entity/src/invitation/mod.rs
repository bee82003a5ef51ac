//! Network invitations and their lifecycle.

pub mod model;
pub mod status;

pub use model::{CreateInvitation, InvitationDetail, NetworkInvitation};
pub use status::{InvitationResponse, InvitationStatus, InvitationTransition};
