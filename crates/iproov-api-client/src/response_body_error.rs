//! Response body error.

use thiserror::Error;

/// Unable to parse the JSON response. Might be because the response is not in JSON when we
/// expected it to be in JSON, or if the JSON that we got does not match the shape that
/// serde expects on our end.
#[derive(Error, Debug)]
#[error("JSON response parsing error: {source}")]
pub struct ResponseBodyError {
    /// The underlying [`serde_json::Error`] error.
    #[source]
    pub source: serde_json::Error,
    /// The full response body that caused this error, useful for inspection.
    pub body: bytes::Bytes,
}

/// A hook into every response body the client reads.
///
/// `inspect_raw` sees each body before it is parsed, including the bodies of non-success
/// responses that are only scanned for an error description. `inspect_error` sees the bodies
/// that were rejected as JSON.
#[async_trait::async_trait]
pub trait Inspector {
    /// Called with the raw body of each response, before parsing.
    async fn inspect_raw(&self, bytes: &[u8]);

    /// Called when a body fails to parse as the expected JSON object.
    async fn inspect_error(&self, error: &ResponseBodyError);
}

/// The default inspector, ignores everything it is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInspector;

#[async_trait::async_trait]
impl Inspector for NoopInspector {
    async fn inspect_raw(&self, _bytes: &[u8]) {}

    async fn inspect_error(&self, _error: &ResponseBodyError) {}
}
