//! File upload, download, and deletion.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use netshare_auth::access::{AccessChecker, AccessGrant, FileAction};
use netshare_core::config::StorageConfig;
use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_core::traits::storage::{ByteStream, StorageProvider};
use netshare_database::repositories::FileRepository;
use netshare_entity::file::{
    CreateFile, File, FileCategory, MAX_FILENAME_LEN, MAX_MIME_TYPE_LEN,
};
use netshare_storage::blob_path;

use crate::context::RequestContext;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Stores uploads through the storage provider and serves them back to
/// callers the access rules allow.
#[derive(Clone)]
pub struct FileService {
    /// File repository.
    files: Arc<FileRepository>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Access checks.
    access: Arc<AccessChecker>,
    /// Largest accepted upload.
    max_upload_size: u64,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService")
            .field("provider", &self.storage.provider_type())
            .field("max_upload_size", &self.max_upload_size)
            .finish()
    }
}

/// A complete upload received in one request.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Client-supplied file name.
    pub filename: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// File body.
    pub data: Bytes,
    /// Whether anyone may view and download it.
    pub is_public: bool,
}

/// A file as seen by one caller.
#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    /// The file row (never includes the storage path).
    #[serde(flatten)]
    pub file: File,
    /// Human-readable size, e.g. `1.5 KB`.
    pub display_size: String,
    /// Why the caller can see it.
    pub access: AccessGrant,
}

impl FileView {
    fn new(file: File, access: AccessGrant) -> Self {
        Self {
            display_size: file.display_size(),
            file,
            access,
        }
    }
}

/// A file body ready to stream.
pub struct FileDownload {
    /// The file row, for response headers.
    pub file: File,
    /// Body stream.
    pub stream: ByteStream,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("file_id", &self.file.id)
            .finish_non_exhaustive()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<FileRepository>,
        storage: Arc<dyn StorageProvider>,
        access: Arc<AccessChecker>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            files,
            storage,
            access,
            max_upload_size: config.max_upload_size_bytes,
        }
    }

    /// Lists the caller's uploads, newest first.
    pub async fn list_owned(&self, ctx: &RequestContext) -> AppResult<Vec<FileView>> {
        let files = self.files.list_by_owner(ctx.user_id).await?;
        Ok(files
            .into_iter()
            .map(|f| FileView::new(f, AccessGrant::Owner))
            .collect())
    }

    /// Stores an upload and records it.
    ///
    /// The category comes from the declared content type. If the row cannot
    /// be written the blob is removed again.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadFile) -> AppResult<FileView> {
        let (filename, mime_type) = upload_metadata(&req.filename, req.content_type.as_deref())?;
        if req.data.is_empty() {
            return Err(AppError::field("file", "The submitted file is empty"));
        }
        if req.data.len() as u64 > self.max_upload_size {
            return Err(AppError::field(
                "file",
                format!("File exceeds the upload limit of {} bytes", self.max_upload_size),
            ));
        }

        let file_type = FileCategory::classify(&mime_type);
        let storage_path = blob_path(Uuid::new_v4(), &filename, ctx.request_time);
        let file_size = req.data.len() as i64;

        self.storage.write(&storage_path, req.data).await?;

        let created = self
            .files
            .create(&CreateFile {
                owner_id: ctx.user_id,
                storage_path: storage_path.clone(),
                filename,
                file_type,
                file_size,
                mime_type,
                is_public: req.is_public,
            })
            .await;

        let file = match created {
            Ok(file) => file,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&storage_path).await {
                    warn!(path = %storage_path, error = %cleanup, "Failed to remove orphaned blob");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            file_type = %file.file_type,
            file_size = file.file_size,
            "File uploaded"
        );

        Ok(FileView::new(file, AccessGrant::Owner))
    }

    /// Loads a file the caller may view.
    pub async fn get(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<FileView> {
        let file = self.find(file_id).await?;
        let access = self
            .access
            .require_file(ctx.user_id, &file, FileAction::View, ctx.request_time)
            .await?;
        Ok(FileView::new(file, access))
    }

    /// Opens a file body for a caller allowed to download it and counts
    /// the download.
    pub async fn download(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<FileDownload> {
        let mut file = self.find(file_id).await?;
        self.access
            .require_file(ctx.user_id, &file, FileAction::Download, ctx.request_time)
            .await?;

        let stream = self.storage.read(&file.storage_path).await?;
        file.download_count = self.files.increment_download_count(file.id).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            download_count = file.download_count,
            "File downloaded"
        );

        Ok(FileDownload { file, stream })
    }

    /// Deletes a file and its blob. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self.find(file_id).await?;
        self.access
            .require_file(ctx.user_id, &file, FileAction::Administer, ctx.request_time)
            .await?;

        self.files.delete(file.id).await?;
        if let Err(e) = self.storage.delete(&file.storage_path).await {
            warn!(file_id = %file.id, path = %file.storage_path, error = %e, "Failed to delete blob");
        }

        info!(user_id = %ctx.user_id, file_id = %file.id, "File deleted");
        Ok(())
    }

    async fn find(&self, file_id: Uuid) -> AppResult<File> {
        self.files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }
}

/// Trimmed file name and content type, checked against the stored column
/// lengths. A missing content type falls back to `application/octet-stream`.
fn upload_metadata(filename: &str, content_type: Option<&str>) -> AppResult<(String, String)> {
    let filename = filename.trim().to_string();
    let mime_type = content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string();

    let mut errors = Vec::new();
    if filename.is_empty() {
        errors.push(("file".to_string(), "A file name is required".to_string()));
    } else if filename.chars().count() > MAX_FILENAME_LEN {
        errors.push((
            "file".to_string(),
            format!("File name must be at most {MAX_FILENAME_LEN} characters"),
        ));
    }
    if mime_type.chars().count() > MAX_MIME_TYPE_LEN {
        errors.push((
            "file".to_string(),
            format!("Content type must be at most {MAX_MIME_TYPE_LEN} characters"),
        ));
    }

    if errors.is_empty() {
        Ok((filename, mime_type))
    } else {
        Err(AppError::fields("Invalid upload", errors))
    }
}

#[cfg(test)]
mod tests {
    use netshare_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_upload_metadata_defaults_content_type() {
        let (name, mime) = upload_metadata("  notes.txt ", Some("  ")).expect("valid");
        assert_eq!(name, "notes.txt");
        assert_eq!(mime, FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn test_upload_metadata_enforces_column_lengths() {
        let longest = "a".repeat(MAX_FILENAME_LEN);
        assert!(upload_metadata(&longest, Some("text/plain")).is_ok());

        let err = upload_metadata(&"a".repeat(MAX_FILENAME_LEN + 1), Some("text/plain"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.details.expect("details")["file"].is_array());

        let long_type = format!("text/{}", "x".repeat(MAX_MIME_TYPE_LEN));
        assert!(upload_metadata("notes.txt", Some(&long_type)).is_err());
        assert!(upload_metadata("   ", None).is_err());
    }
}
