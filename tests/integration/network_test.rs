//! Network creation, credentials, and connections.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, random_mac};

#[tokio::test]
async fn test_create_network_requires_a_device() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.create_user("nodevice").await;

    let response = app
        .request(
            "POST",
            "/api/networks",
            Some(json!({
                "source_device_id": uuid::Uuid::new_v4(),
                "network_name": "Lonely",
                "password": "password123",
                "frequency_band": "2.4GHz",
                "channel": 6,
                "signal_strength": -60,
                "max_devices": 4,
            })),
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_secured_network_without_password_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.create_user("nopass").await;
    let device_id = app.create_device(&user, &random_mac()).await;

    let response = app
        .request(
            "POST",
            "/api/networks",
            Some(json!({
                "source_device_id": device_id,
                "network_name": "Secure",
                "security_type": "wpa3",
                "frequency_band": "6GHz",
                "channel": 500,
                "signal_strength": -60,
                "max_devices": 4,
            })),
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = &response.body["details"];
    assert!(details["password"].is_array(), "{details:?}");
    assert!(details["channel"].is_array(), "{details:?}");
}

#[tokio::test]
async fn test_network_detail_hides_password_and_credentials_need_connect() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("netowner").await;
    let viewer = app.create_user("netviewer").await;
    let network_id = app.create_network(&owner, 4).await;

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data().get("password").is_none());
    assert_eq!(response.data()["access"], "owner");

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}/credentials"),
            None,
            Some(&viewer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/shares"),
            Some(json!({ "shared_with_id": viewer.id, "permission_level": "view" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}"),
            None,
            Some(&viewer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["access"], "share");
    assert!(response.data().get("shares").is_none());

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}/credentials"),
            None,
            Some(&viewer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}/credentials"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["password"], "correct-horse");
}

#[tokio::test]
async fn test_connections_respect_device_limit() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("limitowner").await;
    let network_id = app.create_network(&owner, 1).await;
    let first = app.create_device(&owner, &random_mac()).await;
    let second = app.create_device(&owner, &random_mac()).await;

    let response = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/connections"),
            Some(json!({ "device_id": first })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let connection_id = response.id();

    let response = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/connections"),
            Some(json!({ "device_id": second })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "PUT",
            &format!("/api/connections/{connection_id}/usage"),
            Some(json!({ "connection_quality": 80, "data_used_delta": 2048 })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}/stats"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["connected_devices"], 1);
    assert_eq!(response.data()["total_data_used"], 2048);

    let response = app
        .request(
            "DELETE",
            &format!("/api/networks/{network_id}/connections/{connection_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_usage_report_needs_current_connect_access() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("usageowner").await;
    let guest = app.create_user("usageguest").await;
    let network_id = app.create_network(&owner, 4).await;
    let guest_device = app.create_device(&guest, &random_mac()).await;

    let response = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/shares"),
            Some(json!({ "shared_with_id": guest.id, "permission_level": "connect" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let share_id = response.id();

    let response = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/connections"),
            Some(json!({ "device_id": guest_device })),
            Some(&guest.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let connection_id = response.id();

    let response = app
        .request(
            "PUT",
            &format!("/api/connections/{connection_id}/usage"),
            Some(json!({ "data_used_delta": 512 })),
            Some(&guest.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

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
            "PUT",
            &format!("/api/connections/{connection_id}/usage"),
            Some(json!({ "data_used_delta": 512, "is_connected": true })),
            Some(&guest.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reconnect_through_usage_respects_device_limit() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("reconnect").await;
    let network_id = app.create_network(&owner, 1).await;
    let first = app.create_device(&owner, &random_mac()).await;
    let second = app.create_device(&owner, &random_mac()).await;

    let first_connection = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/connections"),
            Some(json!({ "device_id": first })),
            Some(&owner.token),
        )
        .await
        .id();

    let response = app
        .request(
            "PUT",
            &format!("/api/connections/{first_connection}/usage"),
            Some(json!({ "is_connected": false })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/connections"),
            Some(json!({ "device_id": second })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let second_connection = response.id();

    let response = app
        .request(
            "PUT",
            &format!("/api/connections/{first_connection}/usage"),
            Some(json!({ "is_connected": true })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}/stats"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.data()["connected_devices"], 1);

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    let connections = response.data()["connections"]
        .as_array()
        .expect("connections listed for the owner")
        .clone();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0]["id"], second_connection.to_string());
}

#[tokio::test]
async fn test_padded_network_name_is_stored_trimmed() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = app.create_user("padded").await;
    let device_id = app.create_device(&user, &random_mac()).await;
    let name = "n".repeat(32);

    let response = app
        .request(
            "POST",
            "/api/networks",
            Some(json!({
                "source_device_id": device_id,
                "network_name": format!("  {name}  "),
                "password": "password123",
                "frequency_band": "5GHz",
                "channel": 36,
                "signal_strength": -55,
                "max_devices": 2,
            })),
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["network_name"], name);
}
