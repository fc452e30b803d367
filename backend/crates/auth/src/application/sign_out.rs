//! Sign Out Use Case
//!
//! Ends the cookie session. Always succeeds; the handler clears the cookie
//! regardless of what was presented.

use std::sync::Arc;

use crate::application::session_service::SessionService;
use crate::domain::repository::AuthStore;
use crate::domain::value_object::session_id::SessionId;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: AuthStore,
{
    sessions: SessionService<R>,
}

impl<R> SignOutUseCase<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            sessions: SessionService::new(repo),
        }
    }

    pub async fn execute(&self, session_cookie: Option<&str>) -> AuthResult<()> {
        let Some(session_id) = session_cookie.and_then(SessionId::from_cookie) else {
            return Ok(());
        };

        self.sessions.destroy(&session_id).await?;
        Ok(())
    }
}
