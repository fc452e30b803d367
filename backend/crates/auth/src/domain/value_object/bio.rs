//! Bio Value Object

use crate::error::{AuthError, AuthResult};

/// Maximum bio length in characters
pub const BIO_MAX_LENGTH: usize = 500;

/// Free-form profile text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bio(String);

impl Bio {
    /// Length is counted in Unicode code points.
    pub fn new(raw: impl Into<String>) -> AuthResult<Self> {
        let raw = raw.into();
        if raw.chars().count() > BIO_MAX_LENGTH {
            return Err(AuthError::BioTooLong);
        }
        Ok(Self(raw))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bio_boundary() {
        assert!(Bio::new("a".repeat(BIO_MAX_LENGTH)).is_ok());
        assert!(matches!(
            Bio::new("a".repeat(BIO_MAX_LENGTH + 1)),
            Err(AuthError::BioTooLong)
        ));
    }

    #[test]
    fn test_bio_counts_characters() {
        // 500 Hangul syllables are 1500 bytes
        assert!(Bio::new("가".repeat(BIO_MAX_LENGTH)).is_ok());
    }
}
