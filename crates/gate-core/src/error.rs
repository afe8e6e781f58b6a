//! # Gate Error Types
//!
//! Typed error handling for the checkout and download gate.
//! All gateway and file source operations return `Result<T, GateError>`.

use thiserror::Error;

/// Message returned to callers for anything that must not leak internals
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Core error type for checkout and download operations
#[derive(Debug, Error)]
pub enum GateError {
    /// Missing or malformed client input
    #[error("{0}")]
    InvalidRequest(String),

    /// Endpoint called with an unsupported HTTP method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Required server configuration is absent
    #[error("{0}")]
    Configuration(String),

    /// Payment provider rejected the session lookup
    #[error("Invalid session")]
    InvalidSession { session_id: String },

    /// Session exists but is neither paid nor complete
    #[error("Payment required")]
    PaymentRequired { session_id: String },

    /// Payment provider answered with a non-success status
    #[error("Provider error [{status}]: {message}")]
    Provider { status: u16, message: String },

    /// Blob store answered with a non-success status
    #[error("Unable to retrieve file")]
    FileUnavailable { status: u16 },

    /// Network/HTTP error communicating with an upstream
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GateError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GateError::InvalidRequest(_) => 400,
            GateError::MethodNotAllowed => 405,
            GateError::Configuration(_) => 500,
            GateError::InvalidSession { .. } => 403,
            GateError::PaymentRequired { .. } => 402,
            GateError::Provider { status, .. } => *status,
            GateError::FileUnavailable { .. } => 500,
            GateError::Network(_) => 500,
            GateError::Serialization(_) => 500,
            GateError::Internal(_) => 500,
        }
    }

    /// Message safe to show the caller.
    ///
    /// Provider errors expose only the upstream's own message; transport and
    /// decoding failures collapse to a generic message.
    pub fn public_message(&self) -> String {
        match self {
            GateError::Provider { message, .. } => message.clone(),
            GateError::Network(_) | GateError::Serialization(_) | GateError::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// True when the failure originated from a client mistake rather than the server
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

/// Result type alias for gate operations
pub type GateResult<T> = Result<T, GateError>;
