//! JWT claims carried by access and refresh tokens

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::{
    token_kind::TokenKind,
    user_id::{UserId, parse_subject},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject -- the user id as a decimal string
    pub sub: String,
    /// Expiration time (UTC Unix timestamp, seconds)
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp, seconds)
    pub iat: i64,
    /// Unique token identifier (UUID v4)
    pub jti: String,
    pub token_use: TokenKind,
}

impl TokenClaims {
    pub fn user_id(&self) -> Option<UserId> {
        parse_subject(&self.sub)
    }

    /// Fresh claims for `user_id`, valid for `lifetime` from `issued_at`
    pub fn new(
        user_id: UserId,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: (issued_at + lifetime).timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_use: kind,
        }
    }

    /// Expiry as a timestamp; out-of-range values clamp to the epoch.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let now = Utc::now();
        let claims = TokenClaims::new(
            UserId::from_raw(7),
            TokenKind::Access,
            now,
            Duration::minutes(15),
        );

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_id(), Some(UserId::from_raw(7)));
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }

    #[test]
    fn test_jti_differs_within_same_second() {
        let now = Utc::now();
        let a = TokenClaims::new(UserId::from_raw(1), TokenKind::Refresh, now, Duration::hours(24));
        let b = TokenClaims::new(UserId::from_raw(1), TokenKind::Refresh, now, Duration::hours(24));
        assert_ne!(a.jti, b.jti);
    }
}
