//! Credential verification
//!
//! Shared by both login flows. Unknown email and wrong password are
//! indistinguishable to the caller, in outcome and in hashing cost.

use std::sync::{Arc, LazyLock};

use platform::crypto::random_token;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Hash checked when no account matches, so the miss costs one Argon2 run
static DUMMY_PASSWORD: LazyLock<Option<UserPassword>> = LazyLock::new(|| {
    UserPassword::from_raw(&RawPassword::for_login(random_token(16)), None).ok()
});

pub struct CredentialVerifier<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CredentialVerifier<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve the user owning `email` if `password` matches
    pub async fn verify(&self, email: &str, password: String) -> AuthResult<User> {
        let raw_password = RawPassword::for_login(password);

        // A malformed email cannot belong to anyone.
        let Ok(email) = Email::new(email) else {
            self.verify_dummy(&raw_password);
            return Err(AuthError::InvalidAccount);
        };

        let Some(user) = self.repo.find_user_by_email(&email).await? else {
            self.verify_dummy(&raw_password);
            return Err(AuthError::InvalidAccount);
        };

        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidAccount);
        }

        Ok(user)
    }

    fn verify_dummy(&self, raw_password: &RawPassword) {
        if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
            let _ = dummy.verify(raw_password, self.config.pepper());
        }
    }
}
