//! Accounts Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthStore;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the accounts router for any store implementation
///
/// Paths are relative; the server nests them under `/api`.
pub fn api_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: AuthStore,
{
    let state = AuthAppState { repo, config };

    Router::new()
        .route("/users", post(handlers::create_user::<R>))
        .route("/users/me", get(handlers::me::<R>))
        .route(
            "/auth/token",
            post(handlers::issue_token::<R>).delete(handlers::revoke_token::<R>),
        )
        .route("/auth/token/refresh", post(handlers::refresh_token::<R>))
        .route(
            "/auth/session",
            post(handlers::create_session::<R>).delete(handlers::delete_session::<R>),
        )
        .with_state(state)
}
