//! Standardized API response bodies.

use serde::{Deserialize, Serialize};

/// Error body returned with every 4xx/5xx response.
///
/// `missing` is only set for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing: None,
        }
    }

    pub fn missing_fields(missing: Vec<String>) -> Self {
        Self {
            error: "Missing required fields".to_string(),
            missing: Some(missing),
        }
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

/// Plain confirmation body, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
