//! Phone Number Value Object

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AuthError, AuthResult};

static PHONE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^010-[0-9]{4}-[0-9]{4}$").unwrap_or_else(|e| panic!("phone regex: {e}"))
});

/// Korean mobile number in `010-NNNN-NNNN` form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl Into<String>) -> AuthResult<Self> {
        let raw = raw.into();
        if !PHONE_NUMBER_RE.is_match(&raw) {
            return Err(AuthError::InvalidPhoneNumber);
        }
        Ok(Self(raw))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
