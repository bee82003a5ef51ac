//! Invitation accept, reject, and lazy expiry.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{TestApp, TestUser};

async fn invite(app: &TestApp, owner: &TestUser, invitee: &TestUser, network_id: Uuid) -> Uuid {
    let response = app
        .request(
            "POST",
            &format!("/api/networks/{network_id}/invitations"),
            Some(json!({ "invited_user_id": invitee.id })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["status"], "pending");
    response.id()
}

#[tokio::test]
async fn test_accept_grants_connect_share() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("invowner").await;
    let invitee = app.create_user("invitee").await;
    let network_id = app.create_network(&owner, 4).await;
    let invitation_id = invite(&app, &owner, &invitee, network_id).await;

    let response = app
        .request("GET", "/api/invitations", None, Some(&invitee.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let pending = response.data().as_array().expect("array");
    assert!(pending.iter().any(|i| i["id"] == invitation_id.to_string()));

    let response = app
        .request(
            "POST",
            &format!("/api/invitations/{invitation_id}/accept"),
            None,
            Some(&invitee.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["status"], "accepted");

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}/credentials"),
            None,
            Some(&invitee.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_second_reject_is_conflict() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("rejowner").await;
    let invitee = app.create_user("rejinvitee").await;
    let network_id = app.create_network(&owner, 4).await;
    let invitation_id = invite(&app, &owner, &invitee, network_id).await;
    let path = format!("/api/invitations/{invitation_id}/reject");

    let response = app.request("POST", &path, None, Some(&invitee.token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "rejected");

    let response = app.request("POST", &path, None, Some(&invitee.token)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "POST",
            &format!("/api/invitations/{invitation_id}/accept"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_invitation_fails_and_is_marked_expired() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner = app.create_user("expowner").await;
    let invitee = app.create_user("expinvitee").await;
    let network_id = app.create_network(&owner, 4).await;
    let invitation_id = invite(&app, &owner, &invitee, network_id).await;

    sqlx::query(
        "UPDATE network_invitations SET expires_at = NOW() - INTERVAL '1 minute' WHERE id = $1",
    )
    .bind(invitation_id)
    .execute(&app.db_pool)
    .await
    .expect("Failed to backdate invitation");

    let response = app
        .request(
            "POST",
            &format!("/api/invitations/{invitation_id}/accept"),
            None,
            Some(&invitee.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let status: String =
        sqlx::query_scalar("SELECT status::TEXT FROM network_invitations WHERE id = $1")
            .bind(invitation_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to read status");
    assert_eq!(status, "expired");

    let response = app
        .request(
            "GET",
            &format!("/api/networks/{network_id}/credentials"),
            None,
            Some(&invitee.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
