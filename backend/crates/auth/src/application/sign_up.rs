//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    bio::Bio,
    email::Email,
    phone_number::PhoneNumber,
    user_password::{RawPassword, UserPassword},
};
use crate::error::AuthResult;

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub height: f64,
    pub bio: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Validate, hash and store a registration
    ///
    /// Checks run in order email, password, phone number, bio; the first
    /// failure wins.
    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let phone_number = PhoneNumber::new(input.phone_number)?;
        let bio = input.bio.map(Bio::new).transpose()?;

        // Hash before touching the store
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = self
            .user_repo
            .create_user(NewUser {
                email,
                password_hash,
                name: input.name,
                phone_number,
                height: input.height,
                bio,
            })
            .await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::test_config;
    use crate::error::AuthError;
    use crate::infra::memory::MemoryAuthRepository;

    fn input() -> SignUpInput {
        SignUpInput {
            name: "김와플".to_string(),
            email: "fastapi@wafflestudio.com".to_string(),
            password: "password000".to_string(),
            phone_number: "010-1234-1234".to_string(),
            height: 180.5,
            bio: None,
        }
    }

    fn use_case() -> SignUpUseCase<MemoryAuthRepository> {
        SignUpUseCase::new(Arc::new(MemoryAuthRepository::new()), test_config())
    }

    #[tokio::test]
    async fn test_sign_up() {
        let user = use_case().execute(input()).await.unwrap();
        assert_eq!(user.email.as_str(), "fastapi@wafflestudio.com");
        assert_eq!(user.name, "김와플");
        assert!(user.bio.is_none());
        assert_ne!(user.password_hash.as_phc_string(), "password000");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let sign_up = use_case();
        sign_up.execute(input()).await.unwrap();

        let result = sign_up
            .execute(SignUpInput {
                email: "FastAPI@WaffleStudio.com".to_string(),
                ..input()
            })
            .await;
        assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_validation_order() {
        let sign_up = use_case();

        // Bad password and bad phone: password reported first
        let result = sign_up
            .execute(SignUpInput {
                password: "short".to_string(),
                phone_number: "01012341234".to_string(),
                ..input()
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidPassword)));

        // Bad phone and long bio: phone reported first
        let result = sign_up
            .execute(SignUpInput {
                phone_number: "01012341234".to_string(),
                bio: Some("a".repeat(501)),
                ..input()
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidPhoneNumber)));

        let result = sign_up
            .execute(SignUpInput {
                bio: Some("a".repeat(501)),
                ..input()
            })
            .await;
        assert!(matches!(result, Err(AuthError::BioTooLong)));

        let result = sign_up
            .execute(SignUpInput {
                email: "not-an-email".to_string(),
                password: "short".to_string(),
                ..input()
            })
            .await;
        assert!(matches!(result, Err(AuthError::MissingValue(_))));
    }

    /// Captures formatted log output in memory
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sign_up_log_omits_email() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        use_case().execute(input()).await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("User signed up"), "{output}");
        assert!(output.contains("user_id=1"), "{output}");
        assert!(!output.contains("wafflestudio"), "{output}");
    }

    #[tokio::test]
    async fn test_bio_at_limit() {
        let user = use_case()
            .execute(SignUpInput {
                bio: Some("와".repeat(500)),
                ..input()
            })
            .await
            .unwrap();
        assert_eq!(user.bio.unwrap().as_str().chars().count(), 500);
    }
}
