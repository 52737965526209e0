//! An [`api::response_body_error::Inspector`] that will log response bodies and errors.

use iproov_api_client as api;
use tracing::{error, trace};

/// An inspector that will log the errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInspector;

#[async_trait::async_trait]
impl api::response_body_error::Inspector for LoggingInspector {
    async fn inspect_raw(&self, bytes: &[u8]) {
        trace!(
            message = "iProov API response body",
            body = %String::from_utf8_lossy(bytes),
        );
    }

    async fn inspect_error(&self, err: &api::ResponseBodyError) {
        error!(
            message = "iProov API failed to parse JSON response",
            error = %err.source,
            body = ?err.body,
        );
    }
}
