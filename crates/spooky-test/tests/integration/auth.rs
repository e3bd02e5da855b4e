//! Tests for registration, login and bearer authentication.

use salvo::http::StatusCode;

use spooky_test::component::auth::TokenIssuer;

use super::helpers::*;

// ============================================================================
// Registration
// ============================================================================

#[test_log::test(tokio::test)]
async fn register_creates_user() {
    let app = TestApp::new();

    let body = app
        .register("ana", "s3cret")
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["username"], "ana");
    assert!(
        body["id"].as_str().is_some_and(|id| uuid::Uuid::parse_str(id).is_ok()),
        "id should be a UUID: {body}"
    );
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
}

#[test_log::test(tokio::test)]
async fn register_rejects_taken_username() {
    let app = TestApp::new();
    app.register("ana", "s3cret")
        .await
        .assert_status(StatusCode::CREATED);

    app.register("ana", "another")
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_error("Username already exists");
}

#[test_log::test(tokio::test)]
async fn register_requires_both_credentials() {
    let app = TestApp::new();

    for body in [
        serde_json::json!({ "username": "ana" }),
        serde_json::json!({ "password": "s3cret" }),
        serde_json::json!({ "username": "", "password": "s3cret" }),
    ] {
        TestRequest::post("/auth/register")
            .json(&body)
            .send(&app.service)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[test_log::test(tokio::test)]
async fn register_rejects_malformed_body() {
    let app = TestApp::new();

    TestRequest::post("/auth/register")
        .content_type("application/json")
        .body("{not json")
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Invalid request body");
}

// ============================================================================
// Login
// ============================================================================

#[test_log::test(tokio::test)]
async fn login_issues_verifiable_token() {
    let app = TestApp::new();
    let token = app.signed_in("ana").await;

    let claims = TokenIssuer::new(TEST_JWT_SECRET, 3600)
        .verify(&token)
        .expect("token signed with the configured secret");

    assert_eq!(claims.username, "ana");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test_log::test(tokio::test)]
async fn login_rejects_wrong_password_and_unknown_user() {
    let app = TestApp::new();
    app.register("ana", "s3cret")
        .await
        .assert_status(StatusCode::CREATED);

    let wrong_password = app
        .login("ana", "nope")
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error_message();
    let unknown_user = app
        .login("beto", "s3cret")
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error_message();

    assert_eq!(wrong_password, unknown_user);
}

#[test_log::test(tokio::test)]
async fn login_requires_both_credentials() {
    let app = TestApp::new();

    TestRequest::post("/auth/login")
        .json(&serde_json::json!({ "username": "ana" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Bearer middleware
// ============================================================================

#[test_log::test(tokio::test)]
async fn protected_route_requires_header() {
    let app = TestApp::new();

    TestRequest::get("/houses/me")
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error("Missing authorization header");
}

#[test_log::test(tokio::test)]
async fn protected_route_rejects_other_schemes() {
    let app = TestApp::new();

    TestRequest::get("/houses/me")
        .header("Authorization", "Basic YW5hOnMzY3JldA==")
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error("Invalid authorization format");
}

#[test_log::test(tokio::test)]
async fn protected_route_rejects_bad_tokens() {
    let app = TestApp::new();
    let user_id = uuid::Uuid::now_v7();

    let forged = TokenIssuer::new("some_other_secret", 3600)
        .issue(user_id, "ana")
        .expect("signed");
    let expired = TokenIssuer::new(TEST_JWT_SECRET, 3600)
        .issue_at(user_id, "ana", chrono::Utc::now().timestamp() - 7200)
        .expect("signed");

    for token in ["garbage", forged.as_str(), expired.as_str()] {
        TestRequest::get("/houses/me")
            .bearer(token)
            .send(&app.service)
            .await
            .assert_status(StatusCode::UNAUTHORIZED)
            .assert_error("Invalid or expired token");
    }
}

#[test_log::test(tokio::test)]
async fn valid_token_reaches_handler() {
    let app = TestApp::new();
    let token = app.signed_in("ana").await;

    let body = TestRequest::get("/houses/me")
        .bearer(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(body.is_null(), "new user has no house: {body}");
}
