//! Networks and the devices connected to them.

pub mod connection;
pub mod service;

pub use connection::ConnectionService;
pub use service::{NetworkCredentials, NetworkDetail, NetworkService, NewNetwork};
