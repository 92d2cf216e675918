//! Error types for bitsweb-core
//!
//! The stores themselves never fail. These errors come from parsing user
//! input at the edges: dates, date ranges and owner names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Date is not `YYYY-MM-DD`
    InvalidDate,
    /// Start is after end
    InvalidDateRange,
    /// Unknown owner name
    InvalidOwner,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidDate => write!(f, "INVALID_DATE"),
            ErrorCode::InvalidDateRange => write!(f, "INVALID_DATE_RANGE"),
            ErrorCode::InvalidOwner => write!(f, "INVALID_OWNER"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

/// Main error type for bitsweb-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid date: {value}")]
    InvalidDate { value: String },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid owner: {value}")]
    InvalidOwner { value: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidDate { .. } => ErrorCode::InvalidDate,
            CoreError::InvalidDateRange { .. } => ErrorCode::InvalidDateRange,
            CoreError::InvalidOwner { .. } => ErrorCode::InvalidOwner,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());
        match self {
            CoreError::InvalidDate { .. } => {
                details.with_suggestion("Dates use the YYYY-MM-DD format.".to_string())
            }
            CoreError::InvalidDateRange { .. } => {
                details.with_suggestion("Pick a start date on or before the end date.".to_string())
            }
            CoreError::InvalidOwner { .. } => {
                details.with_suggestion("Valid owners are All, Travis and Dorothy.".to_string())
            }
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_details() {
        let err = CoreError::InvalidDateRange {
            start: "2024-02-01".to_string(),
            end: "2024-01-01".to_string(),
        };
        let details = err.to_details();
        assert_eq!(details.code, ErrorCode::InvalidDateRange);
        assert_eq!(details.suggestions.len(), 1);

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["code"], "INVALID_DATE_RANGE");
    }
}
