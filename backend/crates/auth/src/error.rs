//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Every variant carries
//! a stable public code (`ERR_0NN`) and an uppercase public message.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, GENERIC_ERROR_CODE},
    kind::ErrorKind,
};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a bearer token was refused
///
/// Never shown to clients: every rejection renders as `ERR_008`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Signature, structure or claims do not check out
    Malformed,
    /// Embedded expiry is in the past
    Expired,
    /// Token is on the revocation list
    Revoked,
    /// Access token used where a refresh token is required, or vice versa
    WrongKind,
    /// Subject does not name an existing user
    UnknownSubject,
}

impl std::fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenRejection::Malformed => "malformed",
            TokenRejection::Expired => "expired",
            TokenRejection::Revoked => "revoked",
            TokenRejection::WrongKind => "wrong kind",
            TokenRejection::UnknownSubject => "unknown subject",
        };
        f.write_str(s)
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body missing, malformed, wrongly typed, or email invalid
    #[error("Missing or invalid value: {0}")]
    MissingValue(String),

    /// Password outside the length policy
    #[error("Invalid password")]
    InvalidPassword,

    /// Phone number not in `010-NNNN-NNNN` form
    #[error("Invalid phone number")]
    InvalidPhoneNumber,

    /// Bio longer than allowed
    #[error("Bio too long")]
    BioTooLong,

    /// Email is already registered
    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Session id unknown, expired, or owner gone
    #[error("Invalid session")]
    InvalidSession,

    /// `Authorization` present but not `Bearer <token>`
    #[error("Bad authorization header")]
    BadAuthorizationHeader,

    /// Token failed verification
    #[error("Invalid token ({0})")]
    InvalidToken(TokenRejection),

    /// No credential presented
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Unknown email or wrong password
    #[error("Invalid account")]
    InvalidAccount,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingValue(_)
            | AuthError::InvalidPassword
            | AuthError::InvalidPhoneNumber
            | AuthError::BioTooLong => ErrorKind::UnprocessableEntity,
            AuthError::EmailAlreadyExists => ErrorKind::Conflict,
            AuthError::BadAuthorizationHeader => ErrorKind::BadRequest,
            AuthError::InvalidSession
            | AuthError::InvalidToken(_)
            | AuthError::Unauthenticated
            | AuthError::InvalidAccount => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable public error code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingValue(_) => "ERR_001",
            AuthError::InvalidPassword => "ERR_002",
            AuthError::InvalidPhoneNumber => "ERR_003",
            AuthError::BioTooLong => "ERR_004",
            AuthError::EmailAlreadyExists => "ERR_005",
            AuthError::InvalidSession => "ERR_006",
            AuthError::BadAuthorizationHeader => "ERR_007",
            AuthError::InvalidToken(_) => "ERR_008",
            AuthError::Unauthenticated => "ERR_009",
            AuthError::InvalidAccount => "ERR_010",
            AuthError::Database(_) | AuthError::Internal(_) => GENERIC_ERROR_CODE,
        }
    }

    /// Message shown to clients
    ///
    /// Internal details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingValue(_) => "MISSING VALUE",
            AuthError::InvalidPassword => "INVALID PASSWORD",
            AuthError::InvalidPhoneNumber => "INVALID PHONE NUMBER",
            AuthError::BioTooLong => "BIO TOO LONG",
            AuthError::EmailAlreadyExists => "EMAIL ALREADY EXISTS",
            AuthError::InvalidSession => "INVALID SESSION",
            AuthError::BadAuthorizationHeader => "BAD AUTHORIZATION HEADER",
            AuthError::InvalidToken(_) => "INVALID TOKEN",
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::InvalidAccount => "INVALID ACCOUNT",
            AuthError::Database(_) | AuthError::Internal(_) => "INTERNAL SERVER ERROR",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message()).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidAccount => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken(reason) => {
                tracing::warn!(reason = %reason, "Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
