//! Session ID Value Object
//!
//! Opaque, unguessable session identifier carried in the session cookie:
//! 32 random bytes (256 bits) encoded as unpadded base64url.

use std::fmt;

use platform::crypto::random_token;

/// Random bytes per session id
const SESSION_ID_BYTES: usize = 32;

/// Encoded length of a session id
const SESSION_ID_LEN: usize = 43;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh session id
    pub fn generate() -> Self {
        Self(random_token(SESSION_ID_BYTES))
    }

    /// Accept a cookie value only if it has the shape of a minted id
    ///
    /// Saves a store lookup for obvious garbage.
    pub fn from_cookie(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == SESSION_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        well_formed.then(|| Self(raw.to_string()))
    }

    /// Create from database value
    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Session ids are bearer secrets: keep them out of logs.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionId").field(&"[REDACTED]").finish()
    }
}
