//! Revoke Token Use Case
//!
//! Bearer logout. Any well-formed `Bearer` header succeeds; the token is
//! listed whether or not it verifies.

use std::sync::Arc;

use crate::application::{
    authenticate::require_bearer, config::AuthConfig, token_service::TokenService,
};
use crate::domain::repository::RevokedTokenRepository;
use crate::error::AuthResult;

pub struct RevokeTokenUseCase<R>
where
    R: RevokedTokenRepository,
{
    tokens: TokenService<R>,
}

impl<R> RevokeTokenUseCase<R>
where
    R: RevokedTokenRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            tokens: TokenService::new(repo, config),
        }
    }

    pub async fn execute(&self, authorization: Option<&str>) -> AuthResult<()> {
        let token = require_bearer(authorization)?;
        self.tokens.revoke(token).await?;
        Ok(())
    }
}
