//! File upload, download, and deletion handlers.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use netshare_core::error::AppError;
use netshare_service::file::{FileView, UploadFile};

use super::{ApiResult, ok};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files
pub async fn list_files(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Vec<FileView>> {
    ok(state.file_service.list_owned(&auth).await?)
}

/// POST /api/files: multipart upload with a `file` part and an optional
/// `is_public` part.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<FileView> {
    let mut upload: Option<UploadFile> = None;
    let mut is_public = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::field("file", format!("Multipart error: {e}")))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::field("file", format!("Read error: {e}")))?;
                upload = Some(UploadFile {
                    filename,
                    content_type,
                    data,
                    is_public: false,
                });
            }
            "is_public" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::field("is_public", format!("Read error: {e}")))?;
                is_public = parse_flag(&text)
                    .ok_or_else(|| AppError::field("is_public", "Expected true or false"))?;
            }
            _ => {}
        }
    }

    let mut upload = upload.ok_or_else(|| AppError::field("file", "A file is required"))?;
    upload.is_public = is_public;

    ok(state.file_service.upload(&auth, upload).await?)
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<FileView> {
    ok(state.file_service.get(&auth, id).await?)
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let download = state.file_service.download(&auth, id).await?;
    let file = download.file;

    let content_type = HeaderValue::from_str(&file.mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.filename.replace(['"', '\\'], "_")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from(file.file_size)),
        ],
        Body::from_stream(download.stream),
    )
        .into_response())
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<MessageResponse> {
    state.file_service.delete(&auth, id).await?;
    ok(MessageResponse::new("File deleted"))
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
