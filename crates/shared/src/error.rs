use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed message returned to callers whenever a completion cannot be produced.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate article structure";

pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Upstream,
    Internal,
}

/// JSON error body sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiException {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn generation_failed() -> Self {
        Self::new(ErrorCode::Upstream, GENERATION_FAILED_MESSAGE)
    }
}

impl From<ApiException> for ApiError {
    fn from(value: ApiException) -> Self {
        Self {
            error: value.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} value '{value}'")]
pub struct ParseChoiceError {
    pub field: &'static str,
    pub value: String,
}

impl ParseChoiceError {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}
