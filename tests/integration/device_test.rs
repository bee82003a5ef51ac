//! Device registration and status.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, random_mac};

#[tokio::test]
async fn test_register_device_normalizes_mac() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.create_user("devowner").await;
    let mac = random_mac().to_lowercase();

    let response = app
        .request(
            "POST",
            "/api/devices",
            Some(json!({
                "device_name": "Phone",
                "device_type": "phone",
                "mac_address": mac,
            })),
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["mac_address"], mac.to_uppercase());
}

#[tokio::test]
async fn test_register_device_rejects_bad_mac() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.create_user("badmac").await;

    let response = app
        .request(
            "POST",
            "/api/devices",
            Some(json!({
                "device_name": "Phone",
                "device_type": "phone",
                "mac_address": "INVALID",
            })),
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert!(response.body["details"]["mac_address"].is_array());
}

#[tokio::test]
async fn test_device_status_and_isolation() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("statusowner").await;
    let stranger = app.create_user("statusstranger").await;
    let device_id = app.create_device(&owner, &random_mac()).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/devices/{device_id}/status"),
            Some(json!({ "is_online": true })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "GET",
            &format!("/api/devices/{device_id}/status"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["is_online"], true);

    let response = app
        .request(
            "GET",
            &format!("/api/devices/{device_id}"),
            None,
            Some(&stranger.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/devices", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/devices", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_ok() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["database"], "connected");
}
