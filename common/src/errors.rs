//! Error types shared by the client and the wizard.
//!
//! Every remote call resolves to an [`AppResult`]; the wizard decides how a
//! failure is surfaced, the client never interprets status codes.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Application error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// The request never produced an HTTP response (DNS, refused, reset...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("remote error ({status}): {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Message taken verbatim from the error body.
        message: String,
    },

    /// A success response whose body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Input rejected before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Bad configuration (base URL etc.).
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Text shown to the user when the error is alerted.
    ///
    /// Remote errors surface the service's `message` verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Remote { message, .. } => message.clone(),
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a remote error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
