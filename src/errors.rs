//! Error types for the payjs-rs library.
//!
//! This module defines all error types that can occur while talking to the PayJS gateway.

use thiserror::Error;

/// Main error type for PayJS operations.
#[derive(Error, Debug)]
pub enum PayJsError {
    /// The POST to the gateway failed (network, TLS or non-2xx status)
    #[error("Transport error: {0}")]
    TransportError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The payload could not be encoded, or the response is not the expected JSON shape
    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// The gateway answered with a failure `return_code`
    #[error("Gateway error: return_code={return_code}, status={status}, message={message}")]
    GatewayError {
        /// `return_code` as reported by the gateway
        return_code: i64,
        /// `status` as reported by the gateway (0 when absent)
        status: i64,
        /// `msg`, or `return_msg` when `msg` is empty
        message: String,
    },

    /// The recomputed signature does not match the one the gateway sent
    #[error("Signature verification failed: response signature does not match")]
    IntegrityError,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error parsing URL
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Invalid amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A record that cannot be signed (not a flat JSON object)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for PayJS operations.
pub type Result<T> = std::result::Result<T, PayJsError>;

impl From<reqwest::Error> for PayJsError {
    fn from(err: reqwest::Error) -> Self {
        PayJsError::TransportError(Box::new(err))
    }
}

impl PayJsError {
    /// Wraps any transport failure, for custom [`Transport`](crate::transport::Transport) implementations.
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        PayJsError::TransportError(err.into())
    }
}
