//! HTTP error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use availability_engine::EngineError;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors a handler can return. Every response body is `{"errors": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Query string problems, keyed by parameter name.
    #[error("Invalid query parameters")]
    InvalidQuery(Value),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            ApiError::Engine(EngineError::Validation(errors)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, errors.to_json())
            }
            ApiError::Engine(EngineError::CalendarConflict(_) | EngineError::NoOverlap) => {
                (StatusCode::BAD_REQUEST, Value::from(self.to_string()))
            }
            ApiError::Engine(EngineError::UpstreamUnavailable(msg)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Value::from(msg.as_str()))
            }
            ApiError::InvalidQuery(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "query": fields }),
            ),
        };

        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(json!({ "errors": errors }))).into_response()
    }
}
