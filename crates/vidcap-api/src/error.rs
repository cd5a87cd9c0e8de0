//! HTTP error response conversion
//!
//! Upload endpoints answer with a fixed plain-text message whatever went wrong.
//! [`HttpAppError`] pairs the underlying [`AppError`] with that message, logs the
//! error once, and picks the status according to the configured
//! [`ResponseStatusMode`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use vidcap_core::{AppError, ErrorMetadata, LogLevel, ResponseStatusMode};

/// Wrapper type for AppError to implement IntoResponse
#[derive(Debug)]
pub struct HttpAppError {
    error: AppError,
    message: &'static str,
    status_mode: ResponseStatusMode,
}

impl HttpAppError {
    pub fn new(error: AppError, message: &'static str, status_mode: ResponseStatusMode) -> Self {
        Self {
            error,
            message,
            status_mode,
        }
    }

    pub fn error(&self) -> &AppError {
        &self.error
    }

    pub fn status(&self) -> StatusCode {
        match self.status_mode {
            ResponseStatusMode::Compat => StatusCode::OK,
            ResponseStatusMode::Strict => StatusCode::from_u16(self.error.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = &self.error;

        match error.log_level() {
            LogLevel::Debug => tracing::debug!(
                error = %error,
                error_type = error.error_type(),
                error_code = error.error_code(),
                response = self.message,
                "Request rejected"
            ),
            LogLevel::Warn => tracing::warn!(
                error = %error,
                error_type = error.error_type(),
                error_code = error.error_code(),
                response = self.message,
                "Request failed"
            ),
            LogLevel::Error => tracing::error!(
                error = %error,
                error_type = error.error_type(),
                error_code = error.error_code(),
                recoverable = error.is_recoverable(),
                response = self.message,
                "Request failed"
            ),
        }

        plain_text(status, self.message)
    }
}

/// Plain-text response with an explicit status.
pub fn plain_text(status: StatusCode, message: &'static str) -> Response {
    (status, message).into_response()
}

/// Status for a non-error response that strict mode reports differently (e.g. 405).
pub fn status_for(status_mode: ResponseStatusMode, strict_status: StatusCode) -> StatusCode {
    match status_mode {
        ResponseStatusMode::Compat => StatusCode::OK,
        ResponseStatusMode::Strict => strict_status,
    }
}
