//! Authentication flow over HTTP: sign-up, sign-in, sign-out and admin creation.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{TestApp, ADMIN_KEY, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn welcome_and_health_are_public() {
    let app = TestApp::new();

    let welcome = app.call(Method::GET, "/", None, None).await;
    assert_eq!(welcome.status, StatusCode::OK);
    assert_eq!(welcome.body, json!("Welcome to the subscription tracker api"));

    let health = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
}

#[tokio::test]
async fn unknown_route_is_404_envelope() {
    let app = TestApp::new();
    let response = app.call(Method::GET, "/api/v1/nowhere", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn sign_up_returns_token_user_and_cookie() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/v1/auth/sign-up",
            None,
            json!({"name": "Alice", "email": "Alice@Example.com", "password": PASSWORD}),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "User created successfully");
    assert_eq!(response.body["data"]["user"]["email"], "alice@example.com");
    assert_eq!(response.body["data"]["user"]["isAdmin"], false);
    assert!(response.body["data"]["user"].get("password").is_none());
    assert!(response.body["data"]["token"].as_str().is_some());

    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = TestApp::new();
    app.sign_up("Alice", "alice@example.com").await;

    let response = app
        .post(
            "/api/v1/auth/sign-up",
            None,
            json!({"name": "Other", "email": "ALICE@example.com", "password": PASSWORD}),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn invalid_sign_up_input_is_rejected() {
    let app = TestApp::new();

    let short_password = app
        .post(
            "/api/v1/auth/sign-up",
            None,
            json!({"name": "Alice", "email": "alice@example.com", "password": "123"}),
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .post(
            "/api/v1/auth/sign-up",
            None,
            json!({"name": "Alice", "email": "not-an-email", "password": PASSWORD}),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let missing_field = app
        .post("/api/v1/auth/sign-up", None, json!({"name": "Alice"}))
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.body["success"], false);

    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn sign_in_distinguishes_unknown_user_and_wrong_password() {
    let app = TestApp::new();
    app.sign_up("Alice", "alice@example.com").await;

    let unknown = app
        .post(
            "/api/v1/auth/sign-in",
            None,
            json!({"email": "bob@example.com", "password": PASSWORD}),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let wrong = app
        .post(
            "/api/v1/auth/sign-in",
            None,
            json!({"email": "alice@example.com", "password": "wrong-password"}),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let ok = app
        .post(
            "/api/v1/auth/sign-in",
            None,
            json!({"email": "alice@example.com", "password": PASSWORD}),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["message"], "User signed in successfully");
}

#[tokio::test]
async fn sign_out_clears_cookie() {
    let app = TestApp::new();
    let response = app
        .call(Method::POST, "/api/v1/auth/sign-out", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User signed out successfully");
    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn create_admin_requires_matching_key() {
    let app = TestApp::new();

    let denied = app
        .post(
            "/api/v1/auth/create-admin",
            None,
            json!({"name": "Root", "email": "root@example.com", "password": PASSWORD, "secretKey": "guess"}),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.user_count().await, 0);

    let created = app
        .post(
            "/api/v1/auth/create-admin",
            None,
            json!({"name": "Root", "email": "root@example.com", "password": PASSWORD, "secretKey": ADMIN_KEY}),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["isAdmin"], true);
    assert_eq!(created.body["message"], "Admin account created successfully");
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = TestApp::new();

    let missing = app
        .call(Method::GET, "/api/v1/subscriptions/upcoming-renewals", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .get("/api/v1/subscriptions/upcoming-renewals", "not-a-jwt")
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_authenticates_requests() {
    let app = TestApp::new();
    let (token, _) = app.sign_up("Alice", "alice@example.com").await;

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/v1/subscriptions/upcoming-renewals")
        .header(header::USER_AGENT, "Mozilla/5.0")
        .header(header::COOKIE, format!("theme=dark; token={token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::OK);
}
