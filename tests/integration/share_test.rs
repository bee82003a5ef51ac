//! Network share lifecycle.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_duplicate_share_is_conflict() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("dupowner").await;
    let friend = app.create_user("dupfriend").await;
    let network_id = app.create_network(&owner, 4).await;
    let path = format!("/api/networks/{network_id}/shares");

    let response = app
        .request("POST", &path, Some(json!({ "shared_with_id": friend.id })), Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["permission_level"], "connect");

    let response = app
        .request("POST", &path, Some(json!({ "shared_with_id": friend.id })), Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_share_validation() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("valowner").await;
    let friend = app.create_user("valfriend").await;
    let network_id = app.create_network(&owner, 4).await;
    let path = format!("/api/networks/{network_id}/shares");

    let response = app
        .request("POST", &path, Some(json!({ "shared_with_id": owner.id })), Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            &path,
            Some(json!({ "shared_with_id": uuid::Uuid::new_v4() })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            &path,
            Some(json!({
                "shared_with_id": friend.id,
                "expires_at": Utc::now() - Duration::hours(1),
            })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["expires_at"].is_array());

    let response = app
        .request(
            "POST",
            &path,
            Some(json!({ "shared_with_id": owner.id })),
            Some(&friend.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_connect_share_grants_credentials_until_revoked() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("grantowner").await;
    let friend = app.create_user("grantfriend").await;
    let network_id = app.create_network(&owner, 4).await;

    let response = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/shares"),
            Some(json!({ "shared_with_id": friend.id, "permission_level": "connect" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let share_id = response.id();

    let response = app
        .request("GET", "/api/networks/shared", None, Some(&friend.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let shared = response.data().as_array().expect("array");
    assert!(shared.iter().any(|s| s["network_id"] == network_id.to_string()));

    let credentials = format!("/api/networks/{network_id}/credentials");
    let response = app.request("GET", &credentials, None, Some(&friend.token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "PUT",
            &format!("/api/networks/{network_id}/shares/{share_id}"),
            Some(json!({ "is_active": false })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app.request("GET", &credentials, None, Some(&friend.token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/api/networks/{network_id}/shares/{share_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}/shares"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}
