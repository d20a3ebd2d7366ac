// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Error types for throughput operations.

use std::time::Duration;

use azure_core::http::StatusCode;

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering resources or changing throughput.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required identifier was empty or whitespace.
    #[error("'{name}' cannot be empty or whitespace")]
    InvalidInput { name: &'static str },

    /// The Azure CLI session is missing or expired; the caller must log in again.
    #[error("operation refused: {0}")]
    Authentication(String),

    /// The requested resource or offer does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status code.
    #[error("{reason} (status {}): {body}", status_code(.status))]
    HttpResponse {
        status: StatusCode,
        reason: String,
        body: String,
    },

    /// The account key could not be used to sign a request.
    #[error("invalid account key: {0}")]
    Credential(String),

    /// A payload did not have the expected shape.
    #[error("unexpected data: {0}")]
    DataConversion(String),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("command execution failed: {0}")]
    Io(#[from] std::io::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Core(#[from] azure_core::Error),
}

impl Error {
    /// Returns the HTTP status code, if this error came from a service response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpResponse { status, .. } => Some(*status),
            Error::Core(e) => e.http_status(),
            _ => None,
        }
    }

    /// Returns an [`Error::InvalidInput`] if `value` is empty or only whitespace.
    pub(crate) fn require(name: &'static str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::InvalidInput { name });
        }
        Ok(())
    }
}

fn status_code(status: &StatusCode) -> u16 {
    u16::from(*status)
}
