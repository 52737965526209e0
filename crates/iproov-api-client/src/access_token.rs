//! POST `/{api_key}/access_token`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Client, Error};

impl<RBEI> Client<RBEI>
where
    RBEI: crate::response_body_error::Inspector,
{
    /// Exchange the service account credentials for an OAuth access token.
    ///
    /// Any non-success status is reported as a plain [`reqwest::Error`].
    pub async fn oauth_token(&self, username: &str, password: &str) -> Result<String, Error> {
        let req = AccessTokenRequest {
            grant_type: "client_credentials",
            scope: "user-write",
        };
        debug!(message = "Requesting OAuth access token", %username);
        let res = self
            .build_post(&format!("/{}/access_token", self.credentials.api_key))
            .basic_auth(username, Some(password))
            .form(&req)
            .send()
            .await?
            .error_for_status()?;
        let AccessTokenResponse { access_token } = self.parse_json(res).await?;
        match access_token {
            Some(access_token) if !access_token.is_empty() => Ok(access_token),
            _ => Err(Error::NoToken),
        }
    }
}

/// Input data for the access token request.
#[derive(Debug, Serialize, PartialEq)]
pub struct AccessTokenRequest<'a> {
    /// The OAuth grant type.
    pub grant_type: &'a str,
    /// The requested scope.
    pub scope: &'a str,
}

/// The response from the access token request.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    /// The issued access token.
    access_token: Option<String>,
}
