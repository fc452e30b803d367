//! Revoked Token Entity
//!
//! An entry on the token revocation list. Its presence rejects the token
//! regardless of signature or expiry; once `expires_at` has passed the token
//! would be rejected anyway, so the entry can be swept.

use chrono::{DateTime, Utc};

use crate::domain::value_object::token_digest::TokenDigest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokedToken {
    pub token_digest: TokenDigest,
    /// Original token expiry, or the revocation time for undecodable tokens
    pub expires_at: DateTime<Utc>,
}

impl RevokedToken {
    pub fn new(token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_digest: TokenDigest::of(token),
            expires_at,
        }
    }

    /// Whether the sweeper may drop this entry
    ///
    /// `exp` is checked at whole-second precision, so a token still verifies
    /// during the second it expires in. The entry outlives that second.
    pub fn is_reclaimable_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.expires_at.timestamp()
    }
}
