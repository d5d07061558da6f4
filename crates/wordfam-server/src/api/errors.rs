//! Error handling for the WordFam API
//!
//! This module contains standardized error responses for the API.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use wordfam_core::FamilyError;

use crate::error::ServerError;

/// API Error type for returning standard error responses
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),
    /// Internal server error (500)
    InternalServerError(String),
    /// Service unavailable (503)
    ServiceUnavailable(String),
    /// Engine error, mapped by kind
    Family(FamilyError),
}

impl From<FamilyError> for ApiError {
    fn from(err: FamilyError) -> Self {
        ApiError::Family(err)
    }
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Family(err) => ApiError::Family(err),
            other => ApiError::InternalServerError(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service Unavailable: {}", msg),
            ApiError::Family(err) => write!(f, "{}", err),
        }
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "ERR_BAD_REQUEST", msg.clone()),
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ERR_INTERNAL_SERVER_ERROR", msg.clone())
            }
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "ERR_SERVICE_UNAVAILABLE", msg.clone())
            }
            ApiError::Family(err) => {
                let status = match err {
                    FamilyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    FamilyError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    FamilyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.code(), err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code, message) = self.parts();

        let body = Json(json!({
            "error": message,
            "errorDetails": {
                "errorCode": error_code,
                "errorMessage": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_errors_map_to_status() {
        let cases = [
            (FamilyError::InvalidInput("empty".to_string()), StatusCode::BAD_REQUEST),
            (FamilyError::UpstreamUnavailable("down".to_string()), StatusCode::SERVICE_UNAVAILABLE),
            (FamilyError::Internal("bug".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_server_error_conversion() {
        let err = ApiError::from(ServerError::ConfigError("bad".to_string()));
        assert!(matches!(err, ApiError::InternalServerError(_)));

        let err = ApiError::from(ServerError::Family(FamilyError::InvalidInput("x".to_string())));
        assert!(matches!(err, ApiError::Family(FamilyError::InvalidInput(_))));
    }
}
