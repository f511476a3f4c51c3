//! API Integration Tests
//!
//! Each test boots the full router on an ephemeral port. Accounts and
//! sessions are held in memory, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use integration_tests::{
    assert_json, assert_status, fixtures::*, session_cookie, TestServer,
};
use nutribite_core::{is_effectively_banned, AccountStatus};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn start() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = start().await;
    let response = server.get("/health", None).await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

// ============================================================================
// Login / Session Tests
// ============================================================================

#[tokio::test]
async fn test_login_sets_cookie_and_session_resolves() {
    let server = start().await;
    let user = server.seed(customer(1));

    let response = server
        .post("/api/auth/login", None, &LoginBody::for_user(&user))
        .await
        .unwrap();
    let cookie = session_cookie(&response).expect("login sets a session cookie");
    let body: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.user.id, 1);

    let response = server.get("/api/auth/session", Some(&cookie)).await.unwrap();
    let body: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.user.email, user.email);
    assert_eq!(body.user.user_type, "customer");
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let server = start().await;
    let user = server.seed(customer(2));

    let response = server
        .post("/api/auth/login", None, &LoginBody::new(&user.email, "WrongPassw0rd"))
        .await
        .unwrap();
    assert!(session_cookie(&response).is_none());
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_banned_user_login_refused() {
    let server = start().await;
    let user = server.seed(banned(customer(3)));

    let response = server
        .post("/api/auth/login", None, &LoginBody::for_user(&user))
        .await
        .unwrap();
    assert!(session_cookie(&response).is_none());
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error, "Account is banned");
    assert_eq!(body.code, "ACCOUNT_BANNED");
    assert_eq!(server.sessions.len(), 0);
}

#[tokio::test]
async fn test_unauthenticated_request() {
    let server = start().await;
    let response = server.get("/api/users/me", None).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error, "Authentication required");
}

#[tokio::test]
async fn test_orphan_session_is_anonymous() {
    let server = start().await;
    // session exists but its owner was never stored
    let cookie = server.session_for(&customer(404)).await;

    let response = server.get("/api/users/me", Some(&cookie)).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = start().await;
    let user = server.seed(customer(5));
    let cookie = server.session_for(&user).await;

    let response = server
        .post("/api/auth/logout", Some(&cookie), &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    assert_eq!(server.sessions.len(), 0);

    let response = server.get("/api/auth/session", Some(&cookie)).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Session Gate Tests
// ============================================================================

#[tokio::test]
async fn test_banned_session_denied_everywhere() {
    let server = start().await;
    let user = server.seed(customer(6));
    let cookie = server.session_for(&user).await;

    // banned after the session was opened
    server.users.insert(banned(user));

    let response = server.get("/api/users/me", Some(&cookie)).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error, "Account is banned");

    // public routes too
    let response = server.get("/api/recipes", Some(&cookie)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(server.users.flip_attempts(), 0);
}

#[tokio::test]
async fn test_elapsed_schedule_denied_and_persisted() {
    let server = start().await;
    let user = server.seed(scheduled_ban(customer(7), Utc::now() - Duration::minutes(1)));
    let cookie = server.session_for(&user).await;

    let response = server.get("/api/users/me", Some(&cookie)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let flipped = server
        .wait_for_user(7, |u| u.status == Some(AccountStatus::Banned))
        .await
        .expect("status flipped to banned");
    assert!(flipped.banned_at.is_some());
    assert_eq!(server.users.flips_performed(), 1);
}

#[tokio::test]
async fn test_future_schedule_still_admitted() {
    let server = start().await;
    let user = server.seed(scheduled_ban(customer(8), Utc::now() + Duration::days(1)));
    let cookie = server.session_for(&user).await;

    let response = server.get("/api/users/me", Some(&cookie)).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "active");
    assert_eq!(server.users.flip_attempts(), 0);
}

#[tokio::test]
async fn test_reconcile_failure_still_denies() {
    let server = start().await;
    let user = server.seed(scheduled_ban(customer(9), Utc::now() - Duration::seconds(1)));
    let cookie = server.session_for(&user).await;
    server.users.fail_writes(true);

    let response = server.get("/api/users/me", Some(&cookie)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // the write never lands but every later request is refused anyway
    let response = server.get("/api/users/me", Some(&cookie)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let stored = server.users.get(9).unwrap();
    assert_eq!(stored.status, Some(AccountStatus::Active));
    assert!(is_effectively_banned(&stored, Utc::now()));
}

// ============================================================================
// Admin Login / Session Tests
// ============================================================================

#[tokio::test]
async fn test_admin_login() {
    let server = start().await;
    let user = server.seed(admin(10));

    let response = server
        .post("/api/admin/auth/login", None, &LoginBody::for_user(&user))
        .await
        .unwrap();
    assert!(session_cookie(&response).is_some());
    let body: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.user.user_type, "admin");
}

#[tokio::test]
async fn test_admin_login_bad_credentials() {
    let server = start().await;
    let user = server.seed(admin(11));

    let response = server
        .post("/api/admin/auth/login", None, &LoginBody::new(&user.email, "nope"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_login_rejects_non_admin() {
    let server = start().await;
    let user = server.seed(courier(12));

    let response = server
        .post("/api/admin/auth/login", None, &LoginBody::for_user(&user))
        .await
        .unwrap();
    assert!(session_cookie(&response).is_none());
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error, "Admin access required");
    assert_eq!(server.sessions.len(), 0);
}

#[tokio::test]
async fn test_banned_admin_login_gets_no_cookie() {
    let server = start().await;
    let user = server.seed(scheduled_ban(admin(13), Utc::now() - Duration::hours(2)));

    let response = server
        .post("/api/admin/auth/login", None, &LoginBody::for_user(&user))
        .await
        .unwrap();
    assert!(session_cookie(&response).is_none());
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error, "Account is banned");
    assert_eq!(server.sessions.len(), 0);
}

#[tokio::test]
async fn test_admin_session() {
    let server = start().await;

    let response = server.get("/api/admin/auth/session", None).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let customer = server.seed(customer(14));
    let cookie = server.session_for(&customer).await;
    let response = server
        .get("/api/admin/auth/session", Some(&cookie))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let admin = server.seed(admin(15));
    let cookie = server.session_for(&admin).await;
    let response = server
        .get("/api/admin/auth/session", Some(&cookie))
        .await
        .unwrap();
    let body: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.user.id, 15);

    server.users.insert(banned(admin));
    let response = server
        .get("/api/admin/auth/session", Some(&cookie))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error, "Account is banned");
}

// ============================================================================
// Admin User Management Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let server = start().await;
    let user = server.seed(customer(16));
    let cookie = server.session_for(&user).await;

    let response = server.get("/api/admin/users", Some(&cookie)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get("/api/admin/users", None).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_ban_revokes_sessions() {
    let server = start().await;
    let admin = server.seed(admin(17));
    let target = server.seed(customer(18));
    let admin_cookie = server.session_for(&admin).await;
    let target_cookie = server.session_for(&target).await;

    let response = server
        .post(
            "/api/admin/users/18/ban",
            Some(&admin_cookie),
            &json!({ "reason": "chargeback fraud" }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "banned");
    assert_eq!(body["effectively_banned"], true);
    assert_eq!(body["ban_reason"], "chargeback fraud");

    // session gone, and logging back in is refused
    let response = server.get("/api/users/me", Some(&target_cookie)).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    let response = server
        .post("/api/auth/login", None, &LoginBody::for_user(&target))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post("/api/admin/users/18/unban", Some(&admin_cookie), &json!({}))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "active");
    assert_eq!(body["effectively_banned"], false);
}

#[tokio::test]
async fn test_admin_cannot_ban_self() {
    let server = start().await;
    let admin = server.seed(admin(19));
    let cookie = server.session_for(&admin).await;

    let response = server
        .post("/api/admin/users/19/ban", Some(&cookie), &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
