//! # netshare-storage
//!
//! Blob storage for uploaded files: the local filesystem provider and the
//! date-partitioned path layout used for new uploads.

pub mod layout;
pub mod providers;

pub use layout::{blob_path, sanitize_filename};
pub use providers::local::LocalStorageProvider;
