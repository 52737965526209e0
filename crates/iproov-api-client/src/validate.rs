//! POST `/claim/verify/validate`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Client, Error};

/// The IP address reported for the validating party.
const VALIDATE_IP: &str = "127.0.0.1";

impl<RBEI> Client<RBEI>
where
    RBEI: crate::response_body_error::Inspector,
{
    /// Validate the claim identified by the token.
    ///
    /// The outcome is returned as the service sent it; interpreting it is up to the caller.
    pub async fn validate(&self, token: &str, user_id: &str) -> Result<ValidationResult, Error> {
        let req = ValidateRequest {
            api_key: &self.credentials.api_key,
            secret: &self.credentials.secret,
            user_id,
            token,
            ip: VALIDATE_IP,
            client: &self.credentials.app_id,
        };
        debug!(message = "Validating claim", %user_id);
        let res = self
            .build_post_json("/claim/verify/validate", &req)
            .send()
            .await?;
        self.parse_response(res).await
    }
}

/// Input data for the validate request.
#[derive(Debug, Serialize, PartialEq)]
pub struct ValidateRequest<'a> {
    /// The API key.
    pub api_key: &'a str,
    /// The API secret.
    pub secret: &'a str,
    /// The user the claim is about.
    pub user_id: &'a str,
    /// The claim token.
    pub token: &'a str,
    /// The IP address of the validating party.
    pub ip: &'a str,
    /// The application identifier.
    pub client: &'a str,
}

/// A single value of a loosely typed response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(serde_json::Number),
    /// A string.
    String(String),
    /// A nested array or object, kept as is.
    Structured(serde_json::Value),
}

impl ResultValue {
    /// The value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(val) => Some(*val),
            _ => None,
        }
    }

    /// The value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(val) => Some(val),
            _ => None,
        }
    }

    /// Whether the value reads as `true`, either as a boolean or as a string.
    pub fn is_true(&self) -> bool {
        match self {
            Self::Bool(val) => *val,
            Self::String(val) => val.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// The outcome of a claim validation.
///
/// This is the response object as is; only a couple of well-known fields get accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult(pub BTreeMap<String, ResultValue>);

impl ValidationResult {
    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&ResultValue> {
        self.0.get(key)
    }

    /// Whether the claim passed, if the service said so.
    pub fn passed(&self) -> Option<bool> {
        self.get("passed").and_then(ResultValue::as_bool)
    }

    /// The reason the claim did not pass, if the service gave one.
    pub fn reason(&self) -> Option<&str> {
        self.get("reason").and_then(ResultValue::as_str)
    }

    /// Unwrap the underlying mapping.
    pub fn into_inner(self) -> BTreeMap<String, ResultValue> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{tests::test_client, ServerError};

    #[test]
    fn request_serialization() {
        let expected_request = serde_json::json!({
            "api_key": "key",
            "secret": "secret",
            "user_id": "user@example.com",
            "token": "the token",
            "ip": "127.0.0.1",
            "client": "com.example.app",
        });

        let actual_request = serde_json::to_value(ValidateRequest {
            api_key: "key",
            secret: "secret",
            user_id: "user@example.com",
            token: "the token",
            ip: VALIDATE_IP,
            client: "com.example.app",
        })
        .unwrap();

        assert_eq!(expected_request, actual_request);
    }

    #[test]
    fn response_deserialization() {
        let sample_response = serde_json::json!({
            "passed": false,
            "token": "the token",
            "type": "verify",
            "reason": "Ambiguous outcome",
            "risk_profile": null,
            "frame_available": 1,
            "assurance_type": {"kind": "genuine_presence"},
        });

        let response: ValidationResult = serde_json::from_value(sample_response).unwrap();
        assert_eq!(response.passed(), Some(false));
        assert_eq!(response.reason(), Some("Ambiguous outcome"));
        assert_eq!(response.get("risk_profile"), Some(&ResultValue::Null));
        assert_matches!(
            response.get("frame_available"),
            Some(ResultValue::Number(n)) if n.as_u64() == Some(1)
        );
        assert_matches!(
            response.get("assurance_type"),
            Some(ResultValue::Structured(serde_json::Value::Object(_)))
        );
        assert_eq!(response.get("missing"), None);
    }

    #[test]
    fn non_object_response_is_rejected() {
        assert_matches!(
            serde_json::from_value::<ValidationResult>(serde_json::json!(["passed"])),
            Err(_)
        );
        assert_matches!(
            serde_json::from_value::<ValidationResult>(serde_json::Value::Null),
            Err(_)
        );
    }

    #[test]
    fn truthiness() {
        assert!(ResultValue::Bool(true).is_true());
        assert!(ResultValue::String("true".into()).is_true());
        assert!(ResultValue::String(" True ".into()).is_true());
        assert!(!ResultValue::String("false".into()).is_true());
        assert!(!ResultValue::String("yes".into()).is_true());
        assert!(!ResultValue::Bool(false).is_true());
        assert!(!ResultValue::Null.is_true());
        assert!(!ResultValue::Number(1.into()).is_true());
    }

    #[tokio::test]
    async fn mock_success() {
        let mock_server = MockServer::start().await;

        let sample_response = serde_json::json!({
            "passed": true,
            "token": "the token",
            "type": "verify",
            "frame_available": true
        });

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/claim/verify/validate"))
            .and(matchers::body_json(serde_json::json!({
                "api_key": "my-api-key",
                "secret": "my-secret",
                "user_id": "user@example.com",
                "token": "the token",
                "ip": "127.0.0.1",
                "client": "com.example.app",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&sample_response))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());

        let expected_response: ValidationResult = serde_json::from_value(sample_response).unwrap();
        let actual_response = client
            .validate("the token", "user@example.com")
            .await
            .unwrap();
        assert_eq!(actual_response, expected_response);
        assert_eq!(actual_response.passed(), Some(true));
    }

    #[tokio::test]
    async fn mock_error_described() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/claim/verify/validate"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_token",
                "error_description": "Token is invalid"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());

        let actual_error = client
            .validate("the token", "user@example.com")
            .await
            .unwrap_err();
        assert_matches!(
            actual_error,
            Error::Server(ServerError { message }) if message == "Token is invalid"
        );
    }

    #[tokio::test]
    async fn mock_error_undescribed() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/claim/verify/validate"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());

        let actual_error = client
            .validate("the token", "user@example.com")
            .await
            .unwrap_err();
        assert_matches!(
            actual_error,
            Error::Server(ServerError { message }) if message == "Unexpected status code: 503"
        );
    }

    #[tokio::test]
    async fn mock_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/claim/verify/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());

        let actual_error = client
            .validate("the token", "user@example.com")
            .await
            .unwrap_err();
        assert_matches!(actual_error, Error::InvalidJson(_));
    }
}
