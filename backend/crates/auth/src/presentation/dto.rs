//! API DTOs (Data Transfer Objects)

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::TokenPair;
use crate::domain::entity::user::User;
use crate::error::AuthError;

// ============================================================================
// JSON body extractor
// ============================================================================

/// `Json<T>` whose rejections render as `ERR_001`
///
/// Covers missing fields, wrong types, malformed JSON and a missing
/// `Content-Type`.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AuthError::MissingValue(rejection.body_text()))?;
        Ok(Self(value))
    }
}

// ============================================================================
// Users
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub height: f64,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub bio: Option<String>,
    pub height: f64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.value(),
            name: user.name,
            email: user.email.into_db(),
            phone_number: user.phone_number.as_str().to_string(),
            bio: user.bio.map(|bio| bio.into_inner()),
            height: user.height,
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// Login request, shared by bearer and session login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Access/refresh token pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}
