//! WiFi network entity, radio settings, and credential rules.

pub mod model;
pub mod radio;
pub mod rules;

pub use model::{CreateNetwork, Network, NetworkStats, UpdateNetwork};
pub use radio::{FrequencyBand, SecurityType};
pub use rules::NetworkSettings;
