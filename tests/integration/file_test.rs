//! File upload, download, sharing, and comments.

use axum::http::{StatusCode, header};
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upload_classifies_and_download_counts() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("fileowner").await;

    let response = app
        .upload(&owner.token, "report.pdf", "application/pdf", b"%PDF-1.4 test", false)
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["file_type"], "document");
    assert_eq!(response.data()["file_size"], 13);
    let file_id = response.id();

    let download = app
        .get_raw(&format!("/api/files/{file_id}/download"), &owner.token)
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.body, b"%PDF-1.4 test");
    assert_eq!(
        download.headers[header::CONTENT_TYPE].to_str().ok(),
        Some("application/pdf")
    );

    let response = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.data()["download_count"], 1);
}

#[tokio::test]
async fn test_empty_and_oversized_uploads_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("badupload").await;

    let response = app
        .upload(&owner.token, "empty.txt", "text/plain", b"", false)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let big = vec![0u8; 64 * 1024 + 1];
    let response = app
        .upload(&owner.token, "big.bin", "application/octet-stream", &big, false)
        .await;
    assert!(
        response.status == StatusCode::BAD_REQUEST
            || response.status == StatusCode::PAYLOAD_TOO_LARGE,
        "unexpected status {}",
        response.status
    );
}

#[tokio::test]
async fn test_overlong_file_name_is_a_validation_error() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("longname").await;
    let filename = format!("{}.txt", "a".repeat(300));

    let response = app
        .upload(&owner.token, &filename, "text/plain", b"hello", false)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", response.body);
    assert!(response.body["details"]["file"].is_array(), "{:?}", response.body);

    let response = app.request("GET", "/api/files", None, Some(&owner.token)).await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_private_file_needs_share_and_public_file_does_not() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("privowner").await;
    let other = app.create_user("privother").await;

    let private_id = app
        .upload(&owner.token, "notes.txt", "text/plain", b"secret", false)
        .await
        .id();
    let public_id = app
        .upload(&owner.token, "photo.jpg", "image/jpeg", b"\xFF\xD8\xFF", true)
        .await
        .id();

    let response = app
        .request("GET", &format!("/api/files/{private_id}"), None, Some(&other.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &format!("/api/files/{public_id}"), None, Some(&other.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["access"], "public");
    assert_eq!(response.data()["file_type"], "image");

    let response = app
        .request(
            "POST",
            &format!("/api/files/{private_id}/shares"),
            Some(json!({ "shared_with_id": other.id, "permission_level": "view" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request("GET", &format!("/api/files/{private_id}"), None, Some(&other.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let download = app
        .get_raw(&format!("/api/files/{private_id}/download"), &other.token)
        .await;
    assert_eq!(download.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/files/{private_id}"), None, Some(&other.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_comments_and_delete_rules() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("commentowner").await;
    let reader = app.create_user("commentreader").await;
    let outsider = app.create_user("commentoutsider").await;

    let file_id = app
        .upload(&owner.token, "song.mp3", "audio/mpeg", b"ID3", true)
        .await
        .id();
    let comments = format!("/api/files/{file_id}/comments");

    let response = app
        .request("POST", &comments, Some(json!({ "comment": "Great track" })), Some(&reader.token))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["time_ago"], "just now");
    let comment_id = response.id();

    let response = app
        .request("POST", &comments, Some(json!({ "comment": "" })), Some(&reader.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", &comments, None, Some(&owner.token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total"], 1);

    let response = app
        .request(
            "DELETE",
            &format!("{comments}/{comment_id}"),
            None,
            Some(&outsider.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("{comments}/{comment_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
