//! Expiry Sweep
//!
//! Reclaims expired sessions and revocation entries. Runs once at startup
//! and then periodically in the background.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::{
    config::AuthConfig, session_service::SessionService, token_service::TokenService,
};
use crate::domain::repository::AuthStore;
use crate::error::AuthResult;

/// Rows removed by one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub sessions_deleted: u64,
    pub revocations_deleted: u64,
}

pub struct SweepExpiredUseCase<R>
where
    R: AuthStore,
{
    sessions: SessionService<R>,
    tokens: TokenService<R>,
}

impl<R> SweepExpiredUseCase<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions: SessionService::new(repo.clone()),
            tokens: TokenService::new(repo, config),
        }
    }

    pub async fn execute(&self, now: DateTime<Utc>) -> AuthResult<SweepReport> {
        let sessions_deleted = self.sessions.sweep_expired_sessions(now).await?;
        let revocations_deleted = self.tokens.sweep_expired_revocations(now).await?;

        Ok(SweepReport {
            sessions_deleted,
            revocations_deleted,
        })
    }
}

/// Run the sweep every `config.sweep_interval` until the runtime shuts down
///
/// The first tick fires one interval after spawning. Failures are logged
/// and the loop carries on.
pub fn spawn_sweeper<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> JoinHandle<()>
where
    R: AuthStore,
{
    let period = config.sweep_interval;
    let sweep = SweepExpiredUseCase::new(repo, config);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            match sweep.execute(Utc::now()).await {
                Ok(report) => {
                    if report != SweepReport::default() {
                        tracing::info!(
                            sessions = report.sessions_deleted,
                            revocations = report.revocations_deleted,
                            "Expired auth records swept"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Expired auth record sweep failed");
                }
            }
        }
    })
}
