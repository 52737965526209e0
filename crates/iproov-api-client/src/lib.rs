//! Client API for the iProov claim service.

#![warn(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::clone_on_ref_ptr
)]

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

mod access_token;
mod claim_token;
mod enrol_and_verify;
mod enrol_image;
pub mod response_body_error;
mod server_error;
mod types;
mod validate;


pub use access_token::*;
pub use claim_token::*;
pub use response_body_error::ResponseBodyError;
pub use server_error::*;
pub use types::*;
pub use validate::*;

/// The value of the `User-Agent` header sent with every request.
pub const USER_AGENT: &str = concat!("iproov-api-client/", env!("CARGO_PKG_VERSION"));

/// The generic error type for the client calls.
#[derive(Error, Debug)]
pub enum Error {
    /// The image payload could not be constructed.
    #[error("invalid image")]
    InvalidImage,
    /// The response was a well-formed JSON object, but it had no token in it.
    #[error("no token in the response")]
    NoToken,
    /// The response body could not be parsed as the expected JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] ResponseBodyError),
    /// The service responded with a non-success status.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
    /// An error coming from the underlying reqwest layer.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// The credentials and endpoint the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The base URL to use for the routes.
    pub base_url: String,
    /// The API key issued for the service provider.
    pub api_key: String,
    /// The secret paired with the API key.
    pub secret: String,
    /// The application resource identifier, reported as the claim resource.
    pub app_id: String,
}

/// The iProov API client.
#[derive(Debug)]
pub struct Client<RBEI> {
    /// Underlying HTTP client used to execute network calls.
    pub reqwest: reqwest::Client,
    /// The credentials to authenticate the calls with.
    pub credentials: Credentials,
    /// The response body error inspector.
    pub response_body_error_inspector: RBEI,
}

impl Client<response_body_error::NoopInspector> {
    /// Create a new client with a fresh HTTP client and no response body inspection.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            reqwest: reqwest::Client::new(),
            credentials,
            response_body_error_inspector: response_body_error::NoopInspector,
        }
    }
}

impl<RBEI> Client<RBEI>
where
    RBEI: response_body_error::Inspector,
{
    /// Prepare the URL.
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.credentials.base_url, path)
    }

    /// Apply some common headers.
    fn apply_headers(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    /// An internal utility to prepare a POST HTTP request.
    /// Applies some common logic.
    fn build_post(&self, path: &str) -> RequestBuilder {
        let url = self.build_url(path);
        self.apply_headers(self.reqwest.post(url))
    }

    /// An internal utility to prepare a POST HTTP request with a JSON body.
    fn build_post_json<T>(&self, path: &str, body: &T) -> RequestBuilder
    where
        T: serde::Serialize + ?Sized,
    {
        self.build_post(path).json(body)
    }

    /// Read the response body and parse it as a JSON object.
    ///
    /// The raw bytes and any parsing error are passed to the inspector.
    async fn parse_json<T: DeserializeOwned>(&self, res: Response) -> Result<T, Error> {
        let body = res.bytes().await?;
        self.response_body_error_inspector.inspect_raw(&body).await;
        match parse_object(&body) {
            Ok(val) => Ok(val),
            Err(source) => {
                let err = ResponseBodyError { source, body };
                self.response_body_error_inspector.inspect_error(&err).await;
                Err(Error::InvalidJson(err))
            }
        }
    }

    /// Parse the response of a call that reports failures via `error_description`.
    ///
    /// Non-success statuses are turned into [`ServerError`]s, success bodies are parsed as `T`.
    async fn parse_response<T: DeserializeOwned>(&self, res: Response) -> Result<T, Error> {
        let status = res.status();
        if !status.is_success() {
            let body = res.bytes().await?;
            self.response_body_error_inspector.inspect_raw(&body).await;
            return Err(ServerError::from_response(status, &body).into());
        }
        self.parse_json(res).await
    }
}

/// Parse a JSON object into `T`.
///
/// Any other top-level JSON value is an error, even if `T` could be read from it.
pub(crate) fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(body)?;
    serde_json::from_value(serde_json::Value::Object(object))
}
