//! File category derived from the declared content type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category of an uploaded file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "file_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// `image/*`.
    Image,
    /// PDF, office documents, spreadsheets.
    Document,
    /// `video/*`.
    Video,
    /// `audio/*`.
    Audio,
    /// zip, rar, other archives.
    Archive,
    /// Anything unrecognized.
    #[default]
    Other,
}

impl FileCategory {
    /// Classify a declared content type. First match wins, in this order:
    /// image, video, audio, document, archive.
    pub fn classify(content_type: &str) -> Self {
        let ct = content_type.to_lowercase();
        if ct.starts_with("image") {
            Self::Image
        } else if ct.starts_with("video") {
            Self::Video
        } else if ct.starts_with("audio") {
            Self::Audio
        } else if ["pdf", "document", "word", "spreadsheet"]
            .iter()
            .any(|k| ct.contains(k))
        {
            Self::Document
        } else if ["zip", "rar", "archive"].iter().any(|k| ct.contains(k)) {
            Self::Archive
        } else {
            Self::Other
        }
    }

    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Archive => "archive",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
