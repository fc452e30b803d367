//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticateUseCase, IssueTokenUseCase, PresentedCredentials, RefreshTokenUseCase,
    RevokeTokenUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::AuthStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, TokenPairResponse, UserResponse, ValidJson,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Users
// ============================================================================

/// POST /api/users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        name: req.name,
        email: req.email,
        password: req.password,
        phone_number: req.phone_number,
        height: req.height,
        bio: req.bio,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
{
    let session_cookie = extract_session_cookie(&headers, &state.config);
    // The header is not even read when a session is presented
    let authorization = match session_cookie {
        Some(_) => None,
        None => authorization_header(&headers)?,
    };

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case
        .execute(PresentedCredentials {
            session_cookie: session_cookie.as_deref(),
            authorization,
        })
        .await?;

    Ok(Json(UserResponse::from(user)))
}

// ============================================================================
// Bearer tokens
// ============================================================================

/// POST /api/auth/token
pub async fn issue_token<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AuthResult<Json<TokenPairResponse>>
where
    R: AuthStore,
{
    let use_case = IssueTokenUseCase::new(state.repo.clone(), state.config.clone());
    let pair = use_case.execute(&req.email, req.password).await?;

    Ok(Json(pair.into()))
}

/// POST /api/auth/token/refresh
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<TokenPairResponse>>
where
    R: AuthStore,
{
    let use_case = RefreshTokenUseCase::new(state.repo.clone(), state.config.clone());
    let pair = use_case.execute(authorization_header(&headers)?).await?;

    Ok(Json(pair.into()))
}

/// DELETE /api/auth/token
pub async fn revoke_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<StatusCode>
where
    R: AuthStore,
{
    let use_case = RevokeTokenUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(authorization_header(&headers)?).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Cookie sessions
// ============================================================================

/// POST /api/auth/session
pub async fn create_session<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let session = use_case.execute(input).await?;
    let cookie = set_cookie_header(&state.config.session_cookie(), session.session_id.as_str());

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]))
}

/// DELETE /api/auth/session
pub async fn delete_session<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: AuthStore,
{
    let session_cookie = extract_session_cookie(&headers, &state.config);

    let use_case = SignOutUseCase::new(state.repo.clone());
    // Store errors are logged; the cookie is cleared regardless
    if let Err(e) = use_case.execute(session_cookie.as_deref()).await {
        tracing::warn!(error = %e, "Failed to delete session");
    }

    let cookie = delete_cookie_header(&state.config.session_cookie());

    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)])
}

// ============================================================================
// Helper Functions
// ============================================================================

fn extract_session_cookie(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    extract_cookie(headers, &config.session_cookie_name)
}

/// Raw `Authorization` value; a non-ASCII value is a bad header
fn authorization_header(headers: &HeaderMap) -> AuthResult<Option<&str>> {
    headers
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::BadAuthorizationHeader))
        .transpose()
}
