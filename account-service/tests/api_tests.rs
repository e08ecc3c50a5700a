mod common;

use auth::SessionClaims;
use auth::TokenConfig;
use auth::TokenSigner;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "account-service");
}

#[tokio::test]
async fn test_sign_up_success() {
    let app = TestApp::spawn().await;

    let response = app.sign_up("aa", "e@q.com", "secret").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created successfully");

    let user = &body["data"]["user"];
    assert_eq!(user["name"], "aa");
    assert_eq!(user["email"], "e@q.com");
    assert!(user["id"].is_string());
    assert!(user["created_at"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(!body.to_string().contains("\"secret\""));

    let token = body["data"]["token"].as_str().expect("token present");
    let claims = app.token_signer.verify(token).expect("token verifies");
    assert_eq!(claims.user_id, user["id"].as_str().unwrap());
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);

    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_sign_up_normalizes_email() {
    let app = TestApp::spawn().await;

    let response = app.sign_up("aa", "  E@Q.com ", "secret").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"]["email"], "e@q.com");

    let response = app.sign_in("e@q.com", "secret").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app.sign_up("aa", "e@q.com", "secret").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let response = app.sign_up("bb", "e@q.com", "another").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["status_code"], 409);
    assert_eq!(body["message"], "User already exists");

    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_sign_up_duplicate_email_differing_in_case() {
    let app = TestApp::spawn().await;

    app.sign_up("aa", "e@q.com", "secret").await;
    let response = app.sign_up("aa", "E@Q.COM", "secret").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_sign_up_validation_errors() {
    let app = TestApp::spawn().await;

    let cases = [
        ("a", "e@q.com", "secret"),
        ("aa", "not-an-email", "secret"),
        ("aa", "e@q.com", "abc"),
    ];

    for (name, email, password) in cases {
        let response = app.sign_up(name, email, password).await;
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "expected 422 for {:?}",
            (name, email, password)
        );

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["success"], false);
        assert_eq!(body["status_code"], 422);
    }

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_sign_up_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/sign-up")
        .json(&json!({ "name": "aa", "email": "e@q.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sign_up_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/sign-up")
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::spawn().await;
    app.sign_up("aa", "e@q.com", "secret").await;

    let response = app.sign_in("e@q.com", "secret").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User signed in successfully");
    assert_eq!(body["data"]["user"]["email"], "e@q.com");
    assert!(body["data"]["user"].get("password").is_none());

    let token = body["data"]["token"].as_str().expect("token present");
    let claims = app.token_signer.verify(token).expect("token verifies");
    assert_eq!(claims.user_id, body["data"]["user"]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_sign_in_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app.sign_in("nobody@q.com", "secret").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = TestApp::spawn().await;
    app.sign_up("aa", "e@q.com", "secret").await;

    let response = app.sign_in("e@q.com", "wrong-password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid password");
}

#[tokio::test]
async fn test_sign_in_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.sign_in("not-an-email", "secret").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sign_out_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/sign-out")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["status_code"], 401);
}

#[tokio::test]
async fn test_sign_out_success() {
    let app = TestApp::spawn().await;
    let token = app.sign_up_token("aa", "e@q.com", "secret").await;

    let response = app
        .post_authenticated("/api/v1/auth/sign-out", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User signed out successfully");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_get_current_user() {
    let app = TestApp::spawn().await;
    let token = app.sign_up_token("aa", "e@q.com", "secret").await;

    let response = app
        .get_authenticated("/api/v1/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "aa");
    assert_eq!(body["data"]["email"], "e@q.com");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_get_current_user_for_unknown_subject() {
    let app = TestApp::spawn().await;
    let (token, _) = app
        .token_signer
        .sign(uuid::Uuid::new_v4())
        .expect("token signs");

    let response = app
        .get_authenticated("/api/v1/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::spawn().await;
    let claims = SessionClaims::issued_at(
        uuid::Uuid::new_v4(),
        Utc::now() - Duration::hours(25),
        Duration::hours(24),
    )
    .expect("claims build");
    let token = app.token_signer.encode(&claims).expect("token encodes");

    let response = app
        .get_authenticated("/api/v1/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = TestApp::spawn().await;
    let foreign = TokenSigner::new(TokenConfig::with_hours(
        b"some-other-secret-that-is-also-32-bytes".as_slice(),
        24,
    ));
    let (token, _) = foreign.sign(uuid::Uuid::new_v4()).expect("token signs");

    let response = app
        .post_authenticated("/api/v1/auth/sign-out", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_sign_ups_create_one_user() {
    let app = TestApp::spawn().await;

    let (first, second) = tokio::join!(
        app.sign_up("aa", "e@q.com", "secret"),
        app.sign_up("bb", "e@q.com", "secret"),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(app.repository.len().await, 1);
}
