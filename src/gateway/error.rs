//! Conversion of backend responses into crate errors.

use std::fmt;

use crate::error::SprintboardError;

/// A non-2xx response from the backend
#[derive(Debug)]
pub struct ApiError {
    pub status: http::StatusCode,
    /// Response body, which the backend fills with a plain-text reason
    pub message: String,
}

impl ApiError {
    pub fn new(status: http::StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Build from a response body, trimming and bounding what gets shown
    pub fn from_body(status: http::StatusCode, body: &str) -> Self {
        const MAX_MESSAGE: usize = 200;

        let body = body.trim();
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else if body.chars().count() > MAX_MESSAGE {
            let truncated: String = body.chars().take(MAX_MESSAGE).collect();
            format!("{truncated}...")
        } else {
            body.to_string()
        };
        Self::new(status, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status.as_u16(), self.message)
    }
}

impl From<ApiError> for SprintboardError {
    fn from(error: ApiError) -> Self {
        SprintboardError::Api {
            status: error.status,
            message: error.message,
        }
    }
}
