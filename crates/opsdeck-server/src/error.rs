//! HTTP mapping for report failures.
//!
//! Caller mistakes (unknown report, bad arguments) come back as 4xx with
//! the registry's message verbatim. Store failures are 500s: the body says
//! which report fell over and the log carries the full chain.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl From<opsdeck_reports::Error> for ApiError {
    fn from(err: opsdeck_reports::Error) -> Self {
        use opsdeck_reports::Error::*;
        match err {
            UnknownReport(_) => ApiError::NotFound(err.to_string()),
            MissingParam { .. } | InvalidParam { .. } | UnknownParam { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => {
                error!(%message, "report query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_pick_their_status() {
        let err: ApiError = opsdeck_reports::Error::UnknownReport("nope.nothing".into()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = opsdeck_reports::Error::MissingParam {
            report: "briefings.detail",
            param: "id",
        }
        .into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
