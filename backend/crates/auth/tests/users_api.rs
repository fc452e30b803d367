//! HTTP-level tests for registration and `GET /api/users/me`.

mod common;

use axum::http::{HeaderValue, Method, StatusCode};
use common::{
    assert_error, body_json, build_test_app, fixture_user, login_session, login_tokens,
    post_json, post_raw, register_fixture, with_authorization, with_cookie, with_credentials,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_user_without_password() {
    let app = build_test_app();
    let json = register_fixture(&app).await;

    assert_eq!(json["user_id"], 1);
    assert_eq!(json["name"], "김와플");
    assert_eq!(json["email"], "fastapi@wafflestudio.com");
    assert_eq!(json["phone_number"], "010-1234-1234");
    assert_eq!(json["height"], 180.5);
    assert!(json["bio"].is_null());
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn register_duplicate_email_is_conflict() {
    let app = build_test_app();
    register_fixture(&app).await;

    let mut again = fixture_user();
    again["email"] = json!("FASTAPI@wafflestudio.com");
    let response = post_json(&app, "/api/users", again).await;
    assert_error(response, StatusCode::CONFLICT, "ERR_005").await;
}

#[tokio::test]
async fn register_missing_or_mistyped_fields() {
    let app = build_test_app();

    for field in ["name", "email", "password", "phone_number", "height"] {
        let mut body = fixture_user();
        body.as_object_mut().unwrap().remove(field);
        let response = post_json(&app, "/api/users", body).await;
        assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "ERR_001").await;
    }

    let mut body = fixture_user();
    body["height"] = json!("tall");
    let response = post_json(&app, "/api/users", body).await;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "ERR_001").await;

    let response = post_raw(&app, "/api/users", "{not json").await;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "ERR_001").await;
}

#[tokio::test]
async fn register_invalid_email() {
    let app = build_test_app();
    let mut body = fixture_user();
    body["email"] = json!("not-an-email");

    let response = post_json(&app, "/api/users", body).await;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "ERR_001").await;
}

#[tokio::test]
async fn register_field_validation() {
    let app = build_test_app();

    let cases = [
        ("password", json!("short"), "ERR_002"),
        ("password", json!("a".repeat(21)), "ERR_002"),
        ("phone_number", json!("01012341234"), "ERR_003"),
        ("phone_number", json!("011-1234-1234"), "ERR_003"),
        ("bio", json!("a".repeat(501)), "ERR_004"),
    ];

    for (field, value, code) in cases {
        let mut body = fixture_user();
        body[field] = value;
        let response = post_json(&app, "/api/users", body).await;
        assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, code).await;
    }
}

#[tokio::test]
async fn register_reports_password_before_phone() {
    let app = build_test_app();
    let mut body = fixture_user();
    body["password"] = json!("short");
    body["phone_number"] = json!("01012341234");

    let response = post_json(&app, "/api/users", body).await;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "ERR_002").await;
}

#[tokio::test]
async fn register_boundary_lengths() {
    let app = build_test_app();

    let mut body = fixture_user();
    body["password"] = json!("12345678");
    body["bio"] = json!("a".repeat(500));
    let response = post_json(&app, "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["bio"].as_str().unwrap().len(), 500);
}

// ---------------------------------------------------------------------------
// GET /api/users/me
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_with_access_token() {
    let app = build_test_app();
    register_fixture(&app).await;
    let (access, _) = login_tokens(&app).await;

    let response = with_authorization(
        &app,
        Method::GET,
        "/api/users/me",
        Some(&format!("Bearer {access}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "fastapi@wafflestudio.com");
}

#[tokio::test]
async fn me_with_session_cookie() {
    let app = build_test_app();
    register_fixture(&app).await;
    let cookie = login_session(&app).await;

    let response = with_cookie(&app, Method::GET, "/api/users/me", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user_id"], 1);
    assert_eq!(json["name"], "김와플");
    assert_eq!(json["email"], "fastapi@wafflestudio.com");
    assert_eq!(json["phone_number"], "010-1234-1234");
    assert_eq!(json["height"], 180.5);
    assert!(json["bio"].is_null());
}

#[tokio::test]
async fn me_session_wins_over_another_users_token() {
    let app = build_test_app();
    register_fixture(&app).await;
    let cookie = login_session(&app).await;

    let mut other = fixture_user();
    other["name"] = json!("이와플");
    other["email"] = json!("django@wafflestudio.com");
    other["phone_number"] = json!("010-5678-5678");
    let response = post_json(&app, "/api/users", other).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        &app,
        "/api/auth/token",
        json!({ "email": "django@wafflestudio.com", "password": "password000" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let other_access = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = with_credentials(
        &app,
        Method::GET,
        "/api/users/me",
        Some(&cookie),
        HeaderValue::from_str(&format!("Bearer {other_access}")).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user_id"], 1);
    assert_eq!(json["email"], "fastapi@wafflestudio.com");
}

#[tokio::test]
async fn me_session_ignores_unreadable_authorization() {
    let app = build_test_app();
    register_fixture(&app).await;
    let cookie = login_session(&app).await;
    let unreadable = HeaderValue::from_bytes(b"Bearer \xff").unwrap();

    let response = with_credentials(
        &app,
        Method::GET,
        "/api/users/me",
        Some(&cookie),
        unreadable.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user_id"], 1);

    // Without a session the same header is a bad header
    let response = with_credentials(&app, Method::GET, "/api/users/me", None, unreadable).await;
    assert_error(response, StatusCode::BAD_REQUEST, "ERR_007").await;
}

#[tokio::test]
async fn me_header_errors() {
    let app = build_test_app();
    register_fixture(&app).await;

    let response = with_authorization(&app, Method::GET, "/api/users/me", None).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "ERR_009").await;

    let response =
        with_authorization(&app, Method::GET, "/api/users/me", Some("invalidtoken")).await;
    assert_error(response, StatusCode::BAD_REQUEST, "ERR_007").await;

    let response = with_authorization(
        &app,
        Method::GET,
        "/api/users/me",
        Some("Bearer invalidtoken"),
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "ERR_008").await;
}

#[tokio::test]
async fn me_rejects_refresh_token() {
    let app = build_test_app();
    register_fixture(&app).await;
    let (_, refresh) = login_tokens(&app).await;

    let response = with_authorization(
        &app,
        Method::GET,
        "/api/users/me",
        Some(&format!("Bearer {refresh}")),
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "ERR_008").await;
}

#[tokio::test]
async fn me_with_unknown_session() {
    let app = build_test_app();
    register_fixture(&app).await;

    let response = with_cookie(
        &app,
        Method::GET,
        "/api/users/me",
        "sid=AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
    )
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "ERR_006").await;
}
