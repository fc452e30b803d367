//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//! Every composite operation here must be atomic in the implementation.

use chrono::{DateTime, Utc};

use crate::domain::entity::{
    auth_session::AuthSession,
    revoked_token::RevokedToken,
    user::{NewUser, User},
};
use crate::domain::value_object::{
    email::Email, session_id::SessionId, token_digest::TokenDigest, user_id::UserId,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user, assigning the next id
    ///
    /// The unique-email check and the insert are one atomic step;
    /// fails with `AuthError::EmailAlreadyExists` on a duplicate.
    async fn create_user(&self, user: NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by (lowercase) email
    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID (expired sessions included)
    async fn find_session(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>>;

    /// Delete a session; returns whether it existed
    async fn delete_session(&self, session_id: &SessionId) -> AuthResult<bool>;

    /// Delete every session expired at `now`
    async fn cleanup_expired_sessions(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}

/// Token revocation list
#[trait_variant::make(RevokedTokenRepository: Send)]
pub trait LocalRevokedTokenRepository {
    /// Insert-if-absent
    ///
    /// Returns `true` only for the caller that inserted the entry, which
    /// makes this the consume step of single-use refresh tokens.
    async fn revoke_token(&self, entry: &RevokedToken) -> AuthResult<bool>;

    /// Whether the digest is listed, regardless of the entry's expiry
    async fn is_token_revoked(&self, digest: &TokenDigest) -> AuthResult<bool>;

    /// Delete every entry whose recorded expiry has passed at `now`
    async fn cleanup_expired_revocations(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}

/// Everything the auth handlers need from one backing store
pub trait AuthStore:
    UserRepository + AuthSessionRepository + RevokedTokenRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository
        + AuthSessionRepository
        + RevokedTokenRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
