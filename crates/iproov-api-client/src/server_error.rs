//! Server error handling logic.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// The service rejected the call with a non-success status.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("{message}")]
pub struct ServerError {
    /// The message reported by the service, or synthesized from the status code.
    pub message: String,
}

/// A utility type assisting with decoding error response bodies.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    /// A human-readable description of the error.
    error_description: Option<String>,
}

impl TryFrom<&[u8]> for ErrorResponse {
    type Error = serde_json::Error;

    fn try_from(body: &[u8]) -> Result<Self, Self::Error> {
        crate::parse_object(body)
    }
}

impl ServerError {
    /// Build the error from a non-success response.
    ///
    /// Uses the `error_description` from the body when there is one, and falls back to
    /// the status code otherwise.
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        match ErrorResponse::try_from(body) {
            Ok(ErrorResponse {
                error_description: Some(message),
            }) => Self { message },
            _ => Self::unexpected_status(status),
        }
    }

    /// The error for a status code the service did not explain.
    pub fn unexpected_status(status: StatusCode) -> Self {
        Self {
            message: format!("Unexpected status code: {}", status.as_u16()),
        }
    }
}
