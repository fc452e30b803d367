//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{
    DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_REFRESH_TOKEN_TTL, DEFAULT_SESSION_TTL,
    DEFAULT_SWEEP_INTERVAL, SameSite,
};
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Shortest accepted JWT secret, in bytes
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL; the in-memory store is used when absent
    pub database_url: Option<String>,
    /// CORS allow-list
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        debug_build: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let mut auth = match var("JWT_SECRET") {
            Some(secret_b64) => {
                let secret = general_purpose::STANDARD
                    .decode(secret_b64.trim())
                    .context("JWT_SECRET must be base64")?;
                if secret.len() < MIN_JWT_SECRET_LEN {
                    bail!("JWT_SECRET must decode to at least {MIN_JWT_SECRET_LEN} bytes");
                }
                AuthConfig::with_secret(secret)
            }
            None if debug_build => {
                tracing::warn!("JWT_SECRET not set, using a random secret");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };

        if let Some(name) = var("JWT_ALGORITHM") {
            auth.jwt_algorithm = AuthConfig::parse_algorithm(&name)
                .with_context(|| format!("Unsupported JWT_ALGORITHM: {name}"))?;
        }

        auth.access_token_ttl =
            minutes(&var, "ACCESS_TOKEN_TTL_MINUTES", DEFAULT_ACCESS_TOKEN_TTL)?;
        auth.refresh_token_ttl =
            minutes(&var, "REFRESH_TOKEN_TTL_MINUTES", DEFAULT_REFRESH_TOKEN_TTL)?;
        auth.session_ttl = minutes(&var, "SESSION_TTL_MINUTES", DEFAULT_SESSION_TTL)?;

        auth.sweep_interval = match var("SWEEP_INTERVAL_SECS") {
            Some(raw) => positive(&raw, "SWEEP_INTERVAL_SECS").map(Duration::from_secs)?,
            None => DEFAULT_SWEEP_INTERVAL,
        };

        if let Some(pepper_b64) = var("PASSWORD_PEPPER") {
            let pepper = general_purpose::STANDARD
                .decode(pepper_b64.trim())
                .context("PASSWORD_PEPPER must be base64")?;
            auth.password_pepper = Some(pepper);
        }

        if let Some(raw) = var("COOKIE_SECURE") {
            auth.cookie_secure = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => bail!("COOKIE_SECURE must be a boolean, got {other:?}"),
            };
        }

        if let Some(raw) = var("COOKIE_SAME_SITE") {
            auth.cookie_same_site = SameSite::parse(raw.trim()).with_context(|| {
                format!("COOKIE_SAME_SITE must be Strict, Lax or None, got {raw:?}")
            })?;
        }

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            frontend_origins,
            auth,
        })
    }
}

fn minutes(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> anyhow::Result<Duration> {
    let Some(raw) = var(key) else {
        return Ok(default);
    };
    let seconds = positive(&raw, key)?
        .checked_mul(60)
        .with_context(|| format!("{key} is too large"))?;
    Ok(Duration::from_secs(seconds))
}

fn positive(raw: &str, key: &str) -> anyhow::Result<u64> {
    let value: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a positive integer"))?;
    if value == 0 {
        bail!("{key} must be a positive integer");
    }
    Ok(value)
}
