//! Profile update client: one multipart POST carrying the user id, the bio,
//! and an optional avatar file.

use crate::api::types::ApiEnvelope;
use crate::api::{ApiClient, ClientError};
use crate::profile::types::ProfileUpdate;
use reqwest::multipart::{Form, Part};
use tracing::{info_span, Instrument};

#[derive(Clone)]
pub struct ProfileClient {
    api: ApiClient,
}

impl ProfileClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sends the update as a multipart form to `/user`. The envelope carries
    /// the server's status message and, when the server echoes it, the
    /// updated user record; the local cache is the caller's to refresh.
    ///
    /// # Errors
    /// Returns an error if the form cannot be assembled, the request fails,
    /// or the response cannot be decoded.
    pub async fn update(&self, update: ProfileUpdate) -> Result<ApiEnvelope, ClientError> {
        let form = build_form(update)?;
        let span = info_span!("profile.update", http.method = "POST", path = "/user");
        self.api.post_multipart("/user", form).instrument(span).await
    }
}

fn build_form(update: ProfileUpdate) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .text("_id", update.user_id)
        .text("bio", update.bio);

    if let Some(avatar) = update.avatar {
        let part = Part::bytes(avatar.bytes)
            .file_name(avatar.file_name)
            .mime_str(&avatar.mime)
            .map_err(|err| ClientError::Serialization(format!("invalid avatar part: {err}")))?;
        form = form.part("avatar", part);
    }

    Ok(form)
}
