//! Token Service
//!
//! Issues, verifies and revokes HS-signed JWTs. Verification is stateless
//! except for the revocation list, which is consulted first.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::application::config::{AuthConfig, chrono_ttl};
use crate::domain::entity::revoked_token::RevokedToken;
use crate::domain::repository::RevokedTokenRepository;
use crate::domain::services::JwtCodec;
use crate::domain::value_object::{
    token_claims::TokenClaims, token_digest::TokenDigest, token_kind::TokenKind,
    user_id::UserId,
};
use crate::error::{AuthError, AuthResult, TokenRejection};

/// Access + refresh token pair returned by bearer login and refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct TokenService<R>
where
    R: RevokedTokenRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    codec: JwtCodec,
}

impl<R> TokenService<R>
where
    R: RevokedTokenRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        let codec = JwtCodec::new(&config.jwt_secret, config.jwt_algorithm);
        Self {
            repo,
            config,
            codec,
        }
    }

    /// Sign a token of `kind` for `user_id`, valid for `lifetime`
    pub fn issue(&self, user_id: UserId, kind: TokenKind, lifetime: Duration) -> AuthResult<String> {
        let claims = TokenClaims::new(user_id, kind, Utc::now(), lifetime);
        self.codec
            .encode(&claims)
            .map_err(|e| AuthError::Internal(format!("JWT encoding failed: {e}")))
    }

    /// Access token (short TTL) + refresh token (long TTL)
    pub fn issue_pair(&self, user_id: UserId) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(
                user_id,
                TokenKind::Access,
                chrono_ttl(self.config.access_token_ttl),
            )?,
            refresh_token: self.issue(
                user_id,
                TokenKind::Refresh,
                chrono_ttl(self.config.refresh_token_ttl),
            )?,
        })
    }

    /// Check a presented token
    ///
    /// Order: revoked, then malformed, then expired. A revoked token is
    /// refused even if its signature is bad or it has long expired.
    pub async fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        if self.repo.is_token_revoked(&TokenDigest::of(token)).await? {
            return Err(AuthError::InvalidToken(TokenRejection::Revoked));
        }

        self.codec.decode(token).map_err(AuthError::InvalidToken)
    }

    /// [`Self::verify`] plus a check of the embedded `token_use`
    pub async fn verify_kind(&self, token: &str, expected: TokenKind) -> AuthResult<TokenClaims> {
        let claims = self.verify(token).await?;
        if claims.token_use != expected {
            return Err(AuthError::InvalidToken(TokenRejection::WrongKind));
        }
        Ok(claims)
    }

    /// Put a token on the revocation list
    ///
    /// Expiry is read without validating it; an undecodable token is listed
    /// with the current time as its expiry. Returns whether this call added
    /// the entry, so concurrent callers can race for single use.
    pub async fn revoke(&self, token: &str) -> AuthResult<bool> {
        let expires_at = match self.codec.decode_ignoring_expiry(token) {
            Ok(claims) => claims.expires_at(),
            Err(_) => Utc::now(),
        };

        let inserted = self
            .repo
            .revoke_token(&RevokedToken::new(token, expires_at))
            .await?;

        tracing::debug!(newly_revoked = inserted, "Token revoked");
        Ok(inserted)
    }

    /// Drop revocation entries whose tokens would be expired anyway
    pub async fn sweep_expired_revocations(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        self.repo.cleanup_expired_revocations(now).await
    }
}
