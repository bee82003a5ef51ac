//! Where uploaded blobs live inside a provider.

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

const MAX_NAME_CHARS: usize = 200;

/// Path for a new upload: `files/YYYY/MM/DD/{id}_{sanitized name}`.
pub fn blob_path(id: Uuid, filename: &str, at: DateTime<Utc>) -> String {
    format!(
        "files/{:04}/{:02}/{:02}/{}_{}",
        at.year(),
        at.month(),
        at.day(),
        id.simple(),
        sanitize_filename(filename)
    )
}

/// Reduce a client-supplied name to a safe single path segment.
///
/// Directory components are dropped, anything outside `[A-Za-z0-9._-]`
/// becomes `_`, leading dots are stripped, and the result is capped at
/// 200 characters. An empty result becomes `file`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed: String = cleaned
        .trim_start_matches('.')
        .chars()
        .take(MAX_NAME_CHARS)
        .collect();
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_blob_path_is_date_partitioned() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).single().expect("date");
        let id = Uuid::nil();
        assert_eq!(
            blob_path(id, "report.pdf", at),
            "files/2025/03/07/00000000000000000000000000000000_report.pdf"
        );
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\photo.jpg"), "photo.jpg");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my file (1).txt"), "my_file__1_.txt");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[test]
    fn test_sanitize_caps_length() {
        assert_eq!(sanitize_filename(&"a".repeat(500)).len(), 200);
    }
}
