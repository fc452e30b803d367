#![allow(dead_code)]

use std::sync::Arc;

use auth::{AuthConfig, MemoryAuthRepository, api_router};
use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Router plus handles on the state behind it
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryAuthRepository>,
    pub config: Arc<AuthConfig>,
}

/// Build the API the way the server mounts it, over an in-memory store
pub fn build_test_app() -> TestApp {
    let repo = Arc::new(MemoryAuthRepository::new());
    let config = Arc::new(AuthConfig::development());
    let router = Router::new().nest("/api", api_router(repo.clone(), config.clone()));

    TestApp {
        router,
        repo,
        config,
    }
}

pub fn fixture_user() -> Value {
    json!({
        "name": "김와플",
        "email": "fastapi@wafflestudio.com",
        "password": "password000",
        "phone_number": "010-1234-1234",
        "height": 180.5,
    })
}

pub fn credentials() -> Value {
    json!({ "email": "fastapi@wafflestudio.com", "password": "password000" })
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: &TestApp, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Request with an optional `Authorization` value and no body
pub async fn with_authorization(
    app: &TestApp,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// Request carrying a `Cookie` header and no body
pub async fn with_cookie(app: &TestApp, method: Method, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Request with an arbitrary `Authorization` value and an optional `Cookie`
pub async fn with_credentials(
    app: &TestApp,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    authorization: HeaderValue,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, authorization);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Assert status plus `error_code`
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["error_code"], code, "body: {json}");
    assert!(json["error_msg"].is_string());
}

/// `name=value` part of the response's `Set-Cookie`
pub fn set_cookie_pair(response: &Response<Body>) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie present")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().trim().to_string()
}

pub async fn register_fixture(app: &TestApp) -> Value {
    let response = post_json(app, "/api/users", fixture_user()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Bearer login; returns (access, refresh)
pub async fn login_tokens(app: &TestApp) -> (String, String) {
    let response = post_json(app, "/api/auth/token", credentials()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    (
        json["access_token"].as_str().unwrap().to_string(),
        json["refresh_token"].as_str().unwrap().to_string(),
    )
}

/// Session login; returns the `sid=...` cookie pair
pub async fn login_session(app: &TestApp) -> String {
    let response = post_json(app, "/api/auth/session", credentials()).await;
    assert_eq!(response.status(), StatusCode::OK);
    set_cookie_pair(&response)
}
