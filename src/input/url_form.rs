// src/input/url_form.rs
use url::Url;
use tracing::debug;

use super::{InputError, SubmissionPayload};

/// Product link form. Errors stay inline until the user fixes the input.
#[derive(Debug, Default)]
pub struct UrlForm {
    pub url: String,
    error: Option<InputError>,
}

pub fn validate_url(value: &str) -> Result<Url, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyUrl);
    }
    Url::parse(trimmed).map_err(|_| InputError::InvalidUrl)
}

impl UrlForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn error(&self) -> Option<&InputError> {
        self.error.as_ref()
    }

    /// Re-validates while an error is shown, so the message clears as soon
    /// as the input becomes valid. A blank field keeps the previous error.
    pub fn on_edit(&mut self) {
        if self.error.is_some() && !self.url.trim().is_empty() {
            self.error = validate_url(&self.url).err();
        }
    }

    pub fn submit(&mut self) -> Result<SubmissionPayload, InputError> {
        match validate_url(&self.url) {
            Ok(_) => {
                self.error = None;
                Ok(SubmissionPayload::Url { url: self.url.trim().to_string() })
            }
            Err(e) => {
                debug!(input = %self.url, error = %e, "rejected product URL");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
