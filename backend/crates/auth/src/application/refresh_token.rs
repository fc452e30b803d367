//! Refresh Token Use Case
//!
//! Trades a refresh token for a fresh pair. Each refresh token works once:
//! the revocation insert is the consume step, and only the caller that
//! inserted it gets a new pair.

use std::sync::Arc;

use crate::application::{
    authenticate::require_bearer,
    config::AuthConfig,
    token_service::{TokenPair, TokenService},
};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::token_kind::TokenKind;
use crate::error::{AuthError, AuthResult, TokenRejection};

pub struct RefreshTokenUseCase<R>
where
    R: AuthStore,
{
    repo: Arc<R>,
    tokens: TokenService<R>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            tokens: TokenService::new(repo.clone(), config),
            repo,
        }
    }

    pub async fn execute(&self, authorization: Option<&str>) -> AuthResult<TokenPair> {
        let token = require_bearer(authorization)?;

        let claims = self.tokens.verify_kind(token, TokenKind::Refresh).await?;
        let user_id = claims
            .user_id()
            .ok_or(AuthError::InvalidToken(TokenRejection::Malformed))?;

        if self.repo.find_user_by_id(user_id).await?.is_none() {
            return Err(AuthError::InvalidToken(TokenRejection::UnknownSubject));
        }

        // Lost the race to a concurrent refresh with the same token
        if !self.tokens.revoke(token).await? {
            return Err(AuthError::InvalidToken(TokenRejection::Revoked));
        }

        let pair = self.tokens.issue_pair(user_id)?;
        tracing::info!(user_id = %user_id, "Token pair refreshed");
        Ok(pair)
    }
}
