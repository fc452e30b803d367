//! Session Service
//!
//! Server-side sessions behind the `sid` cookie. Expired sessions are
//! deleted when touched; the sweeper reclaims the rest.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};
use crate::error::AuthResult;

pub struct SessionService<R>
where
    R: AuthSessionRepository + UserRepository,
{
    repo: Arc<R>,
}

impl<R> SessionService<R>
where
    R: AuthSessionRepository + UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Start a session for `user_id` lasting `lifetime`
    pub async fn create(&self, user_id: UserId, lifetime: Duration) -> AuthResult<AuthSession> {
        let session = AuthSession::new(user_id, lifetime);
        self.repo.create_session(&session).await?;

        tracing::info!(user_id = %user_id, "Session created");
        Ok(session)
    }

    /// Owner of a live session
    ///
    /// `None` for an unknown id, an expired session (deleted on the way),
    /// or an owner that no longer exists.
    pub async fn resolve(&self, session_id: &SessionId) -> AuthResult<Option<User>> {
        let Some(session) = self.repo.find_session(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.repo.delete_session(session_id).await?;
            tracing::debug!(user_id = %session.user_id, "Expired session removed on access");
            return Ok(None);
        }

        self.repo.find_user_by_id(session.user_id).await
    }

    /// End a session; returns whether it existed
    pub async fn destroy(&self, session_id: &SessionId) -> AuthResult<bool> {
        let existed = self.repo.delete_session(session_id).await?;
        if existed {
            tracing::info!("Session destroyed");
        }
        Ok(existed)
    }

    pub async fn sweep_expired_sessions(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        self.repo.cleanup_expired_sessions(now).await
    }
}
