//! Uploaded file entity, upload classification, and size formatting.

pub mod category;
pub mod model;
pub mod size;

pub use category::FileCategory;
pub use model::{CreateFile, File, MAX_FILENAME_LEN, MAX_MIME_TYPE_LEN};
pub use size::display_size;
