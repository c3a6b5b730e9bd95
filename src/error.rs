use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::stability::StabilityError;

/// Everything a request can fail with, mapped exhaustively to one terminal
/// HTTP response. No failure is retried; no partial responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required parameters: theme and style are required")]
    MissingParameter,
    #[error("invalid theme: {0}")]
    InvalidTheme(String),
    #[error("invalid style: {0}")]
    InvalidStyle(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("server configuration error: STABILITY_API_KEY is not set")]
    MissingApiKey,
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
        details: String,
    },
    #[error("request timed out (exceeded 60 seconds), please retry")]
    Timeout,
    #[error("cannot reach the image API server, please check network connectivity")]
    Unreachable,
    #[error("internal server error")]
    Internal(String),
}

/// Fixed human-facing messages for the enumerated upstream status codes.
/// Unknown codes fall through to a generic retry message while the original
/// status is still propagated.
fn upstream_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        401 => "API key is invalid, please check the server configuration",
        402 => "API credits exhausted, please top up the account",
        429 => "too many requests, please try again later",
        500 => "image API server error, please try again later",
        _ => "generation failed, please try again",
    }
}

impl From<StabilityError> for ApiError {
    fn from(err: StabilityError) -> Self {
        match err {
            StabilityError::Status { status, body } => ApiError::Upstream {
                status,
                message: upstream_message(status).to_string(),
                details: body,
            },
            StabilityError::Timeout => ApiError::Timeout,
            StabilityError::Connect(_) => ApiError::Unreachable,
            StabilityError::Transport(details) => ApiError::Internal(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingParameter
            | ApiError::InvalidTheme(_)
            | ApiError::InvalidStyle(_)
            | ApiError::MalformedBody(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::MissingApiKey => {
                error!("❌ STABILITY_API_KEY missing from environment");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
            ApiError::Upstream {
                status,
                message,
                details,
            } => {
                error!(status = status.as_u16(), %details, "❌ Stability API error");
                (
                    *status,
                    json!({
                        "error": message,
                        "details": details,
                        "status": status.as_u16(),
                    }),
                )
            }
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                json!({ "error": self.to_string() }),
            ),
            ApiError::Unreachable => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": self.to_string() }),
            ),
            ApiError::Internal(details) => {
                error!(%details, "❌ unclassified failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string(), "details": details }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerated_upstream_codes_have_fixed_messages() {
        assert!(upstream_message(StatusCode::UNAUTHORIZED).contains("API key"));
        assert!(upstream_message(StatusCode::PAYMENT_REQUIRED).contains("credits"));
        assert!(upstream_message(StatusCode::TOO_MANY_REQUESTS).contains("too many"));
        assert!(upstream_message(StatusCode::INTERNAL_SERVER_ERROR).contains("server error"));
    }

    #[test]
    fn unknown_upstream_code_falls_through_to_generic() {
        assert_eq!(
            upstream_message(StatusCode::IM_A_TEAPOT),
            "generation failed, please try again"
        );
    }

    #[test]
    fn stability_errors_map_to_api_errors() {
        let err: ApiError = StabilityError::Timeout.into();
        assert!(matches!(err, ApiError::Timeout));

        let err: ApiError = StabilityError::Connect("dns".into()).into();
        assert!(matches!(err, ApiError::Unreachable));

        let err: ApiError = StabilityError::Status {
            status: StatusCode::PAYMENT_REQUIRED,
            body: "quota".into(),
        }
        .into();
        match err {
            ApiError::Upstream {
                status, details, ..
            } => {
                assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
                assert_eq!(details, "quota");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
