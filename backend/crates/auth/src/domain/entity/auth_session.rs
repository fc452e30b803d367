//! Auth Session Entity
//!
//! Represents a server-side login session referenced by the `sid` cookie.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{session_id::SessionId, user_id::UserId};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    /// Owning user
    pub user_id: UserId,
    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::generate(),
            user_id,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// A session is valid up to and including its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
