//! Commands hierarchy.

use std::path::PathBuf;

use iproov_api_client as api;

use crate::logging_inspector::LoggingInspector;

/// The client type the commands run against.
pub type Client = api::Client<LoggingInspector>;

/// The root of the CLI commands hierarchy.
#[derive(Debug, clap::Parser)]
#[command(version, about = "Talk to the iProov claim service.")]
pub struct Root {
    #[allow(missing_docs, clippy::missing_docs_in_private_items)]
    #[command(flatten)]
    pub credentials: CredentialsParams,

    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// The service endpoint and credentials.
#[derive(Debug, clap::Args)]
pub struct CredentialsParams {
    /// The base URL of the claim API.
    #[arg(long, env = "IPROOV_BASE_URL")]
    pub base_url: String,

    /// The API key.
    #[arg(long, env = "IPROOV_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// The API secret.
    #[arg(long, env = "IPROOV_SECRET", hide_env_values = true)]
    pub secret: String,

    /// The application resource identifier.
    #[arg(long, env = "IPROOV_APP_ID")]
    pub app_id: String,
}

impl CredentialsParams {
    /// Build the client from the params.
    pub fn client(self) -> Client {
        api::Client {
            reqwest: reqwest::Client::new(),
            credentials: api::Credentials {
                base_url: self.base_url,
                api_key: self.api_key,
                secret: self.secret,
                app_id: self.app_id,
            },
            response_body_error_inspector: LoggingInspector,
        }
    }
}

/// The available commands.
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Request a claim token.
    Token(TokenCmd),

    /// Upload an enrollment photo for an enrol token.
    EnrolPhoto(EnrolPhotoCmd),

    /// Validate a completed claim.
    Validate(ValidateCmd),

    /// Enrol a photo and request a verify token for the same user.
    EnrolAndVerify(EnrolAndVerifyCmd),

    /// Exchange service account credentials for an OAuth access token.
    OauthToken(OauthTokenCmd),
}

/// The `token` command.
#[derive(Debug, clap::Args)]
pub struct TokenCmd {
    /// The assurance type: `genuine_presence` or `liveness`.
    #[arg(long, default_value_t = api::AssuranceType::GenuinePresence)]
    pub assurance_type: api::AssuranceType,

    /// The claim type: `verify` or `enrol`.
    #[arg(long)]
    pub claim_type: api::ClaimType,

    /// The user to issue the token for.
    #[arg(long)]
    pub user_id: String,
}

/// The `enrol-photo` command.
#[derive(Debug, clap::Args)]
pub struct EnrolPhotoCmd {
    /// The enrol token.
    #[arg(long)]
    pub token: String,

    /// The path to the JPEG image.
    #[arg(long)]
    pub image: PathBuf,

    /// The photo source: `eid`, `oid` or `selfie`.
    #[arg(long)]
    pub source: api::PhotoSource,
}

/// The `validate` command.
#[derive(Debug, clap::Args)]
pub struct ValidateCmd {
    /// The claim token.
    #[arg(long)]
    pub token: String,

    /// The user the claim is about.
    #[arg(long)]
    pub user_id: String,
}

/// The `enrol-and-verify` command.
#[derive(Debug, clap::Args)]
pub struct EnrolAndVerifyCmd {
    /// The user to enrol.
    #[arg(long)]
    pub user_id: String,

    /// The path to the JPEG image.
    #[arg(long)]
    pub image: PathBuf,

    /// The photo source: `eid`, `oid` or `selfie`.
    #[arg(long)]
    pub source: api::PhotoSource,
}

/// The `oauth-token` command.
#[derive(Debug, clap::Args)]
pub struct OauthTokenCmd {
    /// The service account username.
    #[arg(long)]
    pub username: String,

    /// The service account password.
    #[arg(long, env = "IPROOV_OAUTH_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// An error running a command.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

impl Command {
    /// Run the command and render its output.
    pub async fn run(self, client: &Client) -> Result<String, Error> {
        Ok(match self {
            Self::Token(cmd) => {
                client
                    .request_token(cmd.assurance_type, cmd.claim_type, &cmd.user_id)
                    .await?
            }
            Self::EnrolPhoto(cmd) => {
                let image = read_image(&cmd.image).await?;
                let success = client.enrol_photo(&cmd.token, &image, cmd.source).await?;
                serde_json::json!({ "success": success }).to_string()
            }
            Self::Validate(cmd) => {
                let result = client.validate(&cmd.token, &cmd.user_id).await?;
                serde_json::to_string_pretty(&result)?
            }
            Self::EnrolAndVerify(cmd) => {
                let image = read_image(&cmd.image).await?;
                client
                    .enrol_photo_and_get_verify_token(&cmd.user_id, &image, cmd.source)
                    .await?
            }
            Self::OauthToken(cmd) => client.oauth_token(&cmd.username, &cmd.password).await?,
        })
    }
}

/// Read the image file.
async fn read_image(path: &std::path::Path) -> Result<Vec<u8>, Error> {
    tokio::fs::read(path)
        .await
        .map_err(|err| format!("unable to read image {}: {}", path.display(), err).into())
}
