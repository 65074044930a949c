// src/input/manual_form.rs
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::debug;

use super::{InputError, SubmissionPayload};

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageAttachment {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

impl ImageAttachment {
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let extension = path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(InputError::UnsupportedImage(
                if extension.is_empty() { "no extension".to_string() } else { extension }
            ));
        }

        let metadata = fs::metadata(path)
            .map_err(|e| InputError::ImageUnreadable(e.to_string()))?;
        if !metadata.is_file() {
            return Err(InputError::ImageUnreadable(format!("{} is not a file", path.display())));
        }
        if metadata.len() > MAX_IMAGE_BYTES {
            return Err(InputError::ImageTooLarge(metadata.len()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            file_name: path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size_bytes: metadata.len(),
        })
    }
}

/// Manual product form. Name and price are required, the rest optional.
#[derive(Debug, Default)]
pub struct ManualForm {
    pub product_name: String,
    pub price: String,
    pub reviews: String,
    image: Option<ImageAttachment>,
    image_error: Option<InputError>,
}

impl ManualForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.product_name.trim().is_empty() && !self.price.trim().is_empty()
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn image_error(&self) -> Option<&InputError> {
        self.image_error.as_ref()
    }

    /// A refused file leaves any previously attached image in place.
    pub fn attach_image(&mut self, path: &Path) -> Result<(), InputError> {
        match ImageAttachment::from_path(path) {
            Ok(image) => {
                debug!(file = %image.file_name, bytes = image.size_bytes, "attached product image");
                self.image = Some(image);
                self.image_error = None;
                Ok(())
            }
            Err(e) => {
                self.image_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn remove_image(&mut self) {
        self.image = None;
        self.image_error = None;
    }

    pub fn submit(&self) -> Result<SubmissionPayload, InputError> {
        if self.product_name.trim().is_empty() {
            return Err(InputError::MissingProductName);
        }
        if self.price.trim().is_empty() {
            return Err(InputError::MissingPrice);
        }

        Ok(SubmissionPayload::Manual {
            product_name: self.product_name.trim().to_string(),
            price: self.price.trim().to_string(),
            reviews: self.reviews.trim().to_string(),
            image: self.image.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
