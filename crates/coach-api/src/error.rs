//! API errors and their HTTP mapping. Every error body is `{"detail": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coach_types::{CoachError, ErrorDetail};

pub const NOT_INITIALIZED: &str =
    "AI Assistant is not initialized. Please check server logs for errors.";
pub const UNEXPECTED: &str = "An unexpected internal server error occurred.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("AI Assistant is not initialized")]
    NotInitialized,
    #[error(transparent)]
    Coach(#[from] CoachError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Coach(CoachError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Coach(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::NotInitialized => NOT_INITIALIZED.to_string(),
            ApiError::Coach(CoachError::InvalidInput(msg)) => msg.clone(),
            ApiError::Coach(CoachError::Provider(msg)) => {
                format!("An error occurred during AI processing: {msg}")
            }
            ApiError::Coach(CoachError::Other(_)) => UNEXPECTED.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }
        (status, Json(ErrorDetail { detail: self.detail() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::NotInitialized.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::from(CoachError::InvalidInput("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CoachError::Provider("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn other_errors_hide_internals() {
        let e = ApiError::from(CoachError::Other("db password wrong".into()));
        assert_eq!(e.detail(), UNEXPECTED);
    }

    #[test]
    fn provider_detail_wraps_message() {
        let e = ApiError::from(CoachError::Provider("API error: status: 429".into()));
        assert_eq!(
            e.detail(),
            "An error occurred during AI processing: API error: status: 429"
        );
    }
}
