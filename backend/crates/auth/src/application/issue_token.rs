//! Issue Token Use Case
//!
//! Bearer login: email + password in, access/refresh pair out.

use std::sync::Arc;

use crate::application::{
    config::AuthConfig,
    credentials::CredentialVerifier,
    token_service::{TokenPair, TokenService},
};
use crate::domain::repository::AuthStore;
use crate::error::AuthResult;

pub struct IssueTokenUseCase<R>
where
    R: AuthStore,
{
    credentials: CredentialVerifier<R>,
    tokens: TokenService<R>,
}

impl<R> IssueTokenUseCase<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: CredentialVerifier::new(repo.clone(), config.clone()),
            tokens: TokenService::new(repo, config),
        }
    }

    pub async fn execute(&self, email: &str, password: String) -> AuthResult<TokenPair> {
        let user = self.credentials.verify(email, password).await?;
        let pair = self.tokens.issue_pair(user.user_id)?;

        tracing::info!(user_id = %user.user_id, "Token pair issued");
        Ok(pair)
    }
}
