//! POST `/claim/{claim_type}/token`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AssuranceType, ClaimType, Client, Error};

/// The platform tag reported in the `client` field of token requests.
pub const CLIENT_PLATFORM: &str = "rust";

impl<RBEI> Client<RBEI>
where
    RBEI: crate::response_body_error::Inspector,
{
    /// Request a claim token of the given type for the user.
    pub async fn request_token(
        &self,
        assurance_type: AssuranceType,
        claim_type: ClaimType,
        user_id: &str,
    ) -> Result<String, Error> {
        let req = TokenRequest {
            assurance_type,
            api_key: &self.credentials.api_key,
            secret: &self.credentials.secret,
            resource: &self.credentials.app_id,
            client: CLIENT_PLATFORM,
            user_id,
        };
        debug!(
            message = "Requesting claim token",
            %claim_type,
            %assurance_type,
            %user_id,
        );
        let res = self
            .build_post_json(&format!("/claim/{claim_type}/token"), &req)
            .send()
            .await?;
        let TokenResponse { token } = self.parse_response(res).await?;
        match token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(Error::NoToken),
        }
    }
}

/// Input data for the token request.
#[derive(Debug, Serialize, PartialEq)]
pub struct TokenRequest<'a> {
    /// The liveness mode requested.
    pub assurance_type: AssuranceType,
    /// The API key.
    pub api_key: &'a str,
    /// The API secret.
    pub secret: &'a str,
    /// The application the claim is made for.
    pub resource: &'a str,
    /// The platform tag of this client.
    pub client: &'a str,
    /// The user the claim is about.
    pub user_id: &'a str,
}

/// The response from the token request.
#[derive(Debug, Deserialize, PartialEq)]
struct TokenResponse {
    /// The issued token.
    token: Option<String>,
}
