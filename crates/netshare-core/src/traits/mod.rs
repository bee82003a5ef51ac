//! Core traits defined in `netshare-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
