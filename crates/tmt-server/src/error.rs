//! Mapping from service errors to HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tmt_core::Error;
use tracing::error;

/// Handler error. Renders as `{message, error}` with a status per error kind.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::Validation(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self.0 {
            Error::Validation(_) => "validation",
            Error::Conflict(_) => "conflict",
            Error::NotFound(_) => "not_found",
            Error::Unauthorized(_) => "unauthorized",
            _ => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            Error::Validation(m) | Error::Conflict(m) | Error::Unauthorized(m) => m.clone(),
            Error::NotFound(what) => format!("{} not found", what),
            other => {
                error!("Request failed: {}", other);
                "Internal server error".to_string()
            }
        };

        (
            status,
            Json(serde_json::json!({
                "message": message,
                "error": self.kind(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::Validation("x".into()), StatusCode::BAD_REQUEST),
            (Error::Conflict("x".into()), StatusCode::CONFLICT),
            (Error::NotFound("x".into()), StatusCode::NOT_FOUND),
            (Error::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (Error::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn test_internal_error_response_status() {
        let response = ApiError(Error::Database("disk I/O error".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
