//! User profiles, administration, and the dashboard overview.

pub mod dashboard;
pub mod service;

pub use dashboard::{Dashboard, DashboardService};
pub use service::{Profile, UserService};
