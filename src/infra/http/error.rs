use std::error::Error as StdError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::error::FeedError;

/// Structured diagnostics attached to error responses as an extension so the
/// logging middleware can emit them; never serialized to clients.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Public error response: `{"error": message}` with the matching status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    report: ErrorReport,
}

impl ApiError {
    pub fn new(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        let report = ErrorReport::from_message(source, status, detail);
        Self {
            status,
            message: message.into(),
            report,
        }
    }

    /// Uniform body for any path the surface does not define.
    pub fn unmatched_route() -> Self {
        Self::new(
            "infra::http::fallback",
            StatusCode::NOT_FOUND,
            "404 Not Found",
            "no route matched",
        )
    }

    /// Uniform downgrade for unanticipated internal failures. The detail
    /// stays in the report; clients only ever see the generic message.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(
            "infra::http",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            detail,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        let mut response = (self.status, Json(body)).into_response();
        self.report.attach(&mut response);
        response
    }
}

impl From<FeedError> for ApiError {
    fn from(error: FeedError) -> Self {
        const SOURCE: &str = "infra::http::feed_error_to_api_error";
        let (status, detail) = match &error {
            FeedError::UnsupportedLanguage { language } => (
                StatusCode::BAD_REQUEST,
                format!("language `{language}` is not in the supported set"),
            ),
            FeedError::NoDataAvailable { language } => (
                StatusCode::NOT_FOUND,
                format!("upstream returned an empty payload for `{language}`"),
            ),
            FeedError::Upstream { language, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("upstream fetch for `{language}` failed: {message}"),
            ),
            FeedError::EventParameterRequired => (
                StatusCode::BAD_REQUEST,
                "`event` query parameter missing or empty".to_owned(),
            ),
            FeedError::NoEventsFound => (
                StatusCode::NOT_FOUND,
                "no event matched the requested tokens".to_owned(),
            ),
            FeedError::UnknownSports { tokens } => (
                StatusCode::BAD_REQUEST,
                format!("unknown sport tokens: {}", tokens.join(", ")),
            ),
        };
        let mut report = ErrorReport::from_error(SOURCE, status, &error);
        report.messages.push(detail);
        Self {
            status,
            message: error.to_string(),
            report,
        }
    }
}
