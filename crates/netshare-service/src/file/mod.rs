//! Uploaded files and their comments.

pub mod comment;
pub mod service;

pub use comment::{CommentList, CommentService, CommentView};
pub use service::{FileDownload, FileService, FileView, UploadFile};
