//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);
/// Refresh token lifetime (24 hours)
pub const DEFAULT_REFRESH_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);
/// Cookie session lifetime (24 hours)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 3600);
/// Interval between background sweeps (5 minutes)
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HMAC secret for signing JWTs
    pub jwt_secret: Vec<u8>,
    /// HS256, HS384 or HS512
    pub jwt_algorithm: Algorithm,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Period of the expired session / revocation sweeper
    pub sweep_interval: Duration,
}

impl AuthConfig {
    /// Default settings signing with `jwt_secret`
    ///
    /// There is no secret-less constructor; callers check the key length.
    pub fn with_secret(jwt_secret: Vec<u8>) -> Self {
        Self {
            session_cookie_name: "sid".to_string(),
            jwt_secret,
            jwt_algorithm: Algorithm::HS256,
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Create config with a random JWT secret
    ///
    /// Tokens do not survive a restart with such a secret.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::with_secret(secret)
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Parse an HMAC algorithm name; asymmetric algorithms are refused.
    pub fn parse_algorithm(name: &str) -> Option<Algorithm> {
        match name.to_ascii_uppercase().as_str() {
            "HS256" => Some(Algorithm::HS256),
            "HS384" => Some(Algorithm::HS384),
            "HS512" => Some(Algorithm::HS512),
            _ => None,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(i64::try_from(self.session_ttl.as_secs()).unwrap_or(i64::MAX)),
        }
    }
}

/// Longest TTL honoured; keeps timestamp arithmetic in range
const MAX_TTL_DAYS: i64 = 36_500;

/// Convert a configured TTL to a `chrono` duration, clamped to [`MAX_TTL_DAYS`]
pub(crate) fn chrono_ttl(ttl: Duration) -> chrono::Duration {
    let max = chrono::Duration::days(MAX_TTL_DAYS);
    chrono::Duration::from_std(ttl).map_or(max, |d| d.min(max))
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sweep_interval", &self.sweep_interval)
            .finish()
    }
}
