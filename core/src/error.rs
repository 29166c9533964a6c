//! Error types for the registry API client.
//!
//! # Design
//! Configuration and validation failures are raised before any request
//! leaves the process. Transport failures and non-2xx responses are kept
//! apart so callers can tell "never reached the service" from "the service
//! said no". Nothing is retried or swallowed here.

use std::fmt;

use thiserror::Error;

/// Shorthand for results produced by this crate.
pub type Result<T, E = SudregError> = std::result::Result<T, E>;

/// Errors returned by `SudregClient`.
#[derive(Debug, Error)]
pub enum SudregError {
    /// The client was constructed with missing or malformed settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A request parameter is outside what the endpoint accepts.
    #[error("validation error: {0}")]
    Validation(String),

    /// The request never produced an HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}{}", body_suffix(.body))]
    Api { status: u16, body: Option<String> },

    /// A 2xx response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl SudregError {
    /// True when the service reported that the requested data does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SudregError::Api { status: 404, .. })
    }

    /// The upstream error body parsed as JSON, when there is one and it parses.
    pub fn api_payload(&self) -> Option<serde_json::Value> {
        match self {
            SudregError::Api { body: Some(body), .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref().map(|b| format!(": {b}")).unwrap_or_default()
}

/// Coarse classification of a network-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Io,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::Io => "i/o failure",
            TransportErrorKind::Other => "transport failure",
        };
        f.write_str(label)
    }
}

/// Failure raised by a `Transport` before a response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }
}
