//! `Authorization` header parsing

use thiserror::Error;

/// The header was present but is not a usable bearer credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Authorization header is not a bearer credential")]
pub struct MalformedAuthorization;

/// Split `Bearer <token>` into its token
///
/// The scheme is matched case-insensitively and must be followed by a
/// single space and a non-empty token without further whitespace.
pub fn parse_bearer(value: &str) -> Result<&str, MalformedAuthorization> {
    let (scheme, token) = value.split_once(' ').ok_or(MalformedAuthorization)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(MalformedAuthorization);
    }

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(MalformedAuthorization);
    }

    Ok(token)
}
