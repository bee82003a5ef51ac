//! Device entity, device types, and MAC address parsing.

pub mod kind;
pub mod mac;
pub mod model;

pub use kind::DeviceType;
pub use mac::MacAddress;
pub use model::{CreateDevice, Device, UpdateDevice};
