//! Error conversions - HTTP rendering of [`AppError`]
//!
//! Every error leaves the service as
//! `{"error_code": "ERR_0NN", "error_msg": "<MESSAGE>"}`.

use serde::Serialize;

use super::app_error::AppError;

/// Wire shape of an error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody<'a> {
    pub error_code: &'a str,
    pub error_msg: &'a str,
}

impl<'a> From<&'a AppError> for ErrorBody<'a> {
    fn from(err: &'a AppError) -> Self {
        Self {
            error_code: err.code(),
            error_msg: err.message(),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}
