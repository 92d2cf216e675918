//! Error types for bitsweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bitsweb_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Backend request failed: {message}")]
    Backend { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Backend { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Config { .. } | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED) {
            return ApiError::Unauthorized;
        }
        ApiError::Backend { message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Invalid(err) => serde_json::json!({
                "success": false,
                "message": self.to_string(),
                "error": err.to_details(),
            }),
            _ => serde_json::json!({
                "success": false,
                "message": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid: ApiError = CoreError::InvalidOwner { value: "bob".to_string() }.into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Backend { message: "down".to_string() }.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound { resource: "x".to_string() }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
