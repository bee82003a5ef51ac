//! Device-to-network connection records.

pub mod model;

pub use model::{Connection, ConnectionDetail, CreateConnection, QUALITY_RANGE, UsageReport};
