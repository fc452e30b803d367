//! In-Memory Repository Implementation
//!
//! Process-local store used when no database is configured, and by tests.
//! Each composite operation holds one write lock for its whole duration.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::{
    auth_session::AuthSession,
    revoked_token::RevokedToken,
    user::{NewUser, User},
};
use crate::domain::repository::{AuthSessionRepository, RevokedTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, session_id::SessionId, token_digest::TokenDigest, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct UserTable {
    by_id: HashMap<UserId, User>,
    by_email: HashMap<Email, UserId>,
    last_id: i64,
}

/// In-memory auth repository
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    users: Arc<RwLock<UserTable>>,
    sessions: Arc<RwLock<HashMap<SessionId, AuthSession>>>,
    revoked: Arc<RwLock<HashMap<TokenDigest, DateTime<Utc>>>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MemoryAuthRepository {
    async fn create_user(&self, user: NewUser) -> AuthResult<User> {
        let mut users = self.users.write().await;

        if users.by_email.contains_key(&user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        users.last_id += 1;
        let user_id = UserId::from_raw(users.last_id);
        let user = user.into_user(user_id, Utc::now());

        users.by_email.insert(user.email.clone(), user_id);
        users.by_id.insert(user_id, user.clone());

        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.by_id.get(&user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for MemoryAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn delete_session(&self, session_id: &SessionId) -> AuthResult<bool> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    async fn cleanup_expired_sessions(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

// ============================================================================
// Revoked Token Repository Implementation
// ============================================================================

impl RevokedTokenRepository for MemoryAuthRepository {
    async fn revoke_token(&self, entry: &RevokedToken) -> AuthResult<bool> {
        let mut revoked = self.revoked.write().await;
        if revoked.contains_key(&entry.token_digest) {
            return Ok(false);
        }
        revoked.insert(entry.token_digest, entry.expires_at);
        Ok(true)
    }

    async fn is_token_revoked(&self, digest: &TokenDigest) -> AuthResult<bool> {
        Ok(self.revoked.read().await.contains_key(digest))
    }

    async fn cleanup_expired_revocations(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut revoked = self.revoked.write().await;
        let before = revoked.len();
        revoked.retain(|digest, expires_at| {
            !RevokedToken {
                token_digest: *digest,
                expires_at: *expires_at,
            }
            .is_reclaimable_at(now)
        });
        Ok((before - revoked.len()) as u64)
    }
}
