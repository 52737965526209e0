//! The enrol-then-verify flow.

use tracing::warn;

use crate::{AssuranceType, ClaimType, Client, Error, PhotoSource};

impl<RBEI> Client<RBEI>
where
    RBEI: crate::response_body_error::Inspector,
{
    /// Enrol the user with the photo and obtain a token to verify them against it.
    ///
    /// The steps run strictly in order, and the first error aborts the rest. An enrollment
    /// that the service did not report as successful does not abort the flow.
    pub async fn enrol_photo_and_get_verify_token(
        &self,
        user_id: &str,
        image: &[u8],
        source: PhotoSource,
    ) -> Result<String, Error> {
        let enrol_token = self
            .request_token(AssuranceType::GenuinePresence, ClaimType::Enrol, user_id)
            .await?;

        let enrolled = self.enrol_photo(&enrol_token, image, source).await?;
        if !enrolled {
            warn!(message = "Photo enrollment was not reported as successful", %user_id);
        }

        self.request_token(AssuranceType::GenuinePresence, ClaimType::Verify, user_id)
            .await
    }
}
