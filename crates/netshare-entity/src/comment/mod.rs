//! File comments and relative age formatting.

pub mod age;
pub mod model;

pub use age::time_ago;
pub use model::{CommentDetail, CreateComment, FileComment, MAX_COMMENT_LEN};
