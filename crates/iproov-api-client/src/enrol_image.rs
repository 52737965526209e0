//! POST `/claim/enrol/image`

use std::collections::BTreeMap;

use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::{Client, Error, PhotoSource, ResultValue};

/// The rotation reported for the uploaded image.
const ROTATION: &str = "0";

/// The file name the image part is uploaded under.
const IMAGE_FILE_NAME: &str = "image.jpg";

/// The content type of the image part.
const IMAGE_MIME: &str = "image/jpeg";

impl<RBEI> Client<RBEI>
where
    RBEI: crate::response_body_error::Inspector,
{
    /// Upload the enrollment photo for the claim identified by the enrol token.
    ///
    /// Returns whether the service reported a success. The response status is not checked,
    /// only a body that is not a JSON object is an error.
    pub async fn enrol_photo(
        &self,
        token: &str,
        image: &[u8],
        source: PhotoSource,
    ) -> Result<bool, Error> {
        let form = self.enrol_form(token, image, source)?;
        debug!(message = "Enrolling photo", %source, image_len = image.len());
        let res = self
            .build_post("/claim/enrol/image")
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            warn!(message = "Photo enrollment responded with a failure status", %status);
        }

        let response: BTreeMap<String, ResultValue> = self.parse_json(res).await?;
        Ok(response.get("success").is_some_and(ResultValue::is_true))
    }

    /// Build the multipart form for the photo enrollment.
    fn enrol_form(&self, token: &str, image: &[u8], source: PhotoSource) -> Result<Form, Error> {
        if image.is_empty() {
            return Err(Error::InvalidImage);
        }
        let image_part = Part::bytes(image.to_vec())
            .file_name(IMAGE_FILE_NAME)
            .mime_str(IMAGE_MIME)
            .map_err(|err| {
                debug!(message = "Unable to build the image part", error = %err);
                Error::InvalidImage
            })?;

        Ok(Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("secret", self.credentials.secret.clone())
            .text("rotation", ROTATION)
            .text("token", token.to_owned())
            .part("image", image_part)
            .text("source", source.as_str()))
    }
}
