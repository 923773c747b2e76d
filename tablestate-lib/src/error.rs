//! Error types
//!
//! The query-string codec never fails; malformed input degrades to the
//! caller's defaults. The only fallible part of the mechanism is fetching a
//! page from a data source.

use std::time::Duration;

/// Errors that can occur while fetching a page of rows.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Non-success HTTP response from the external source.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },

    /// Network error reaching the external source.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The fetch exceeded its deadline.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The response body was not the expected page shape.
    #[error("Response decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl SourceError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new decode error with the raw response body.
    pub fn decode_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the fetch failed by running out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
