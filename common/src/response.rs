//! Error envelope returned by the database viewer service.
//!
//! Failed requests answer with a JSON body carrying at least a `message`.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Error body of a failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// HTTP status echoed in the body (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Service-specific error sub code (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_code: Option<i64>,

    /// Human-readable error message.
    pub message: String,
}

impl ErrorBody {
    /// Builds the [`AppError`] for a response with the given status and raw body.
    ///
    /// Falls back to `fallback` (usually the reason phrase) when the body is
    /// not an error envelope.
    pub fn into_error(status: u16, raw: &str, fallback: &str) -> AppError {
        let message = serde_json::from_str::<ErrorBody>(raw)
            .map(|body| body.message)
            .unwrap_or_else(|_| fallback.to_string());
        AppError::Remote { status, message }
    }
}
