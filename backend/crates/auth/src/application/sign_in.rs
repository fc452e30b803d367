//! Sign In Use Case
//!
//! Session login: email + password in, new server-side session out.

use std::sync::Arc;

use crate::application::{
    config::{AuthConfig, chrono_ttl},
    credentials::CredentialVerifier,
    session_service::SessionService,
};
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthStore;
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: AuthStore,
{
    credentials: CredentialVerifier<R>,
    sessions: SessionService<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: CredentialVerifier::new(repo.clone(), config.clone()),
            sessions: SessionService::new(repo),
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<AuthSession> {
        let user = self.credentials.verify(&input.email, input.password).await?;

        self.sessions
            .create(user.user_id, chrono_ttl(self.config.session_ttl))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{memory_repo_with_user, test_config};
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_sign_in_creates_distinct_sessions() {
        let (repo, user) = memory_repo_with_user().await;
        let sign_in = SignInUseCase::new(repo.clone(), test_config());
        let input = || SignInInput {
            email: "fastapi@wafflestudio.com".into(),
            password: "password000".into(),
        };

        let a = sign_in.execute(input()).await.unwrap();
        let b = sign_in.execute(input()).await.unwrap();
        assert_eq!(a.user_id, user.user_id);
        assert_ne!(a.session_id, b.session_id);

        let sessions = SessionService::new(repo);
        assert!(sessions.resolve(&a.session_id).await.unwrap().is_some());
        assert!(sessions.resolve(&b.session_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let (repo, _) = memory_repo_with_user().await;
        let result = SignInUseCase::new(repo, test_config())
            .execute(SignInInput {
                email: "spring@wafflestudio.com".into(),
                password: "password000".into(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidAccount)));
    }
}
