//! Authenticate Use Case
//!
//! Resolves the caller of a protected route. The session cookie wins over
//! the `Authorization` header when both are present.

use std::sync::Arc;

use platform::authorization::parse_bearer;

use crate::application::{
    config::AuthConfig, session_service::SessionService, token_service::TokenService,
};
use crate::domain::entity::user::User;
use crate::domain::repository::AuthStore;
use crate::domain::value_object::{session_id::SessionId, token_kind::TokenKind};
use crate::error::{AuthError, AuthResult, TokenRejection};

/// Credentials lifted from a request
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentedCredentials<'a> {
    /// Value of the session cookie, if any
    pub session_cookie: Option<&'a str>,
    /// Raw `Authorization` header value, if any
    pub authorization: Option<&'a str>,
}

/// Extract the token from a `Bearer` header
///
/// Missing header is `Unauthenticated`; any other shape is
/// `BadAuthorizationHeader`.
pub fn require_bearer(authorization: Option<&str>) -> AuthResult<&str> {
    let value = authorization.ok_or(AuthError::Unauthenticated)?;
    parse_bearer(value).map_err(|_| AuthError::BadAuthorizationHeader)
}

pub struct AuthenticateUseCase<R>
where
    R: AuthStore,
{
    repo: Arc<R>,
    sessions: SessionService<R>,
    tokens: TokenService<R>,
}

impl<R> AuthenticateUseCase<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions: SessionService::new(repo.clone()),
            tokens: TokenService::new(repo.clone(), config),
            repo,
        }
    }

    pub async fn execute(&self, credentials: PresentedCredentials<'_>) -> AuthResult<User> {
        if let Some(raw) = credentials.session_cookie {
            return self.by_session(raw).await;
        }

        if credentials.authorization.is_some() {
            let token = require_bearer(credentials.authorization)?;
            return self.by_access_token(token).await;
        }

        Err(AuthError::Unauthenticated)
    }

    async fn by_session(&self, raw: &str) -> AuthResult<User> {
        let session_id = SessionId::from_cookie(raw).ok_or(AuthError::InvalidSession)?;
        self.sessions
            .resolve(&session_id)
            .await?
            .ok_or(AuthError::InvalidSession)
    }

    async fn by_access_token(&self, token: &str) -> AuthResult<User> {
        let claims = self.tokens.verify_kind(token, TokenKind::Access).await?;
        let user_id = claims
            .user_id()
            .ok_or(AuthError::InvalidToken(TokenRejection::Malformed))?;

        self.repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken(TokenRejection::UnknownSubject))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::application::test_support::{memory_repo_with_user, test_config};
    use crate::domain::entity::auth_session::AuthSession;
    use crate::domain::repository::AuthSessionRepository;
    use crate::domain::value_object::user_id::UserId;

    #[test]
    fn test_require_bearer() {
        assert_eq!(require_bearer(Some("Bearer abc")).unwrap(), "abc");
        assert!(matches!(
            require_bearer(None),
            Err(AuthError::Unauthenticated)
        ));
        assert!(matches!(
            require_bearer(Some("abc")),
            Err(AuthError::BadAuthorizationHeader)
        ));
        assert!(matches!(
            require_bearer(Some("Basic abc")),
            Err(AuthError::BadAuthorizationHeader)
        ));
    }

    #[tokio::test]
    async fn test_access_token() {
        let (repo, user) = memory_repo_with_user().await;
        let config = test_config();
        let pair = TokenService::new(repo.clone(), config.clone())
            .issue_pair(user.user_id)
            .unwrap();
        let header = format!("Bearer {}", pair.access_token);

        let found = AuthenticateUseCase::new(repo, config)
            .execute(PresentedCredentials {
                session_cookie: None,
                authorization: Some(&header),
            })
            .await
            .unwrap();
        assert_eq!(found.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_refresh_token_is_refused() {
        let (repo, user) = memory_repo_with_user().await;
        let config = test_config();
        let pair = TokenService::new(repo.clone(), config.clone())
            .issue_pair(user.user_id)
            .unwrap();
        let header = format!("Bearer {}", pair.refresh_token);

        let result = AuthenticateUseCase::new(repo, config)
            .execute(PresentedCredentials {
                session_cookie: None,
                authorization: Some(&header),
            })
            .await;
        assert!(matches!(
            result,
            Err(AuthError::InvalidToken(TokenRejection::WrongKind))
        ));
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let (repo, _) = memory_repo_with_user().await;
        let config = test_config();
        let token = TokenService::new(repo.clone(), config.clone())
            .issue(UserId::from_raw(404), TokenKind::Access, Duration::minutes(5))
            .unwrap();
        let header = format!("Bearer {token}");

        let result = AuthenticateUseCase::new(repo, config)
            .execute(PresentedCredentials {
                session_cookie: None,
                authorization: Some(&header),
            })
            .await;
        assert!(matches!(
            result,
            Err(AuthError::InvalidToken(TokenRejection::UnknownSubject))
        ));
    }

    #[tokio::test]
    async fn test_session_takes_precedence() {
        let (repo, user) = memory_repo_with_user().await;
        let session = AuthSession::new(user.user_id, Duration::hours(1));
        repo.create_session(&session).await.unwrap();

        let found = AuthenticateUseCase::new(repo, test_config())
            .execute(PresentedCredentials {
                session_cookie: Some(session.session_id.as_str()),
                authorization: Some("garbage"),
            })
            .await
            .unwrap();
        assert_eq!(found.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_bad_session_does_not_fall_back() {
        let (repo, user) = memory_repo_with_user().await;
        let config = test_config();
        let pair = TokenService::new(repo.clone(), config.clone())
            .issue_pair(user.user_id)
            .unwrap();
        let header = format!("Bearer {}", pair.access_token);

        for cookie in ["short", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"] {
            let result = AuthenticateUseCase::new(repo.clone(), config.clone())
                .execute(PresentedCredentials {
                    session_cookie: Some(cookie),
                    authorization: Some(&header),
                })
                .await;
            assert!(matches!(result, Err(AuthError::InvalidSession)), "{cookie}");
        }
    }

    #[tokio::test]
    async fn test_nothing_presented() {
        let (repo, _) = memory_repo_with_user().await;
        let result = AuthenticateUseCase::new(repo, test_config())
            .execute(PresentedCredentials::default())
            .await;
        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }
}
