//! Device registration and status.

pub mod service;

pub use service::{DeviceChanges, DeviceDetail, DeviceService, DeviceStatus, RegisterDevice};
