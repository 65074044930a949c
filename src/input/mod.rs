// src/input/mod.rs
use std::path::PathBuf;
use serde::{Serialize, Deserialize};
use thiserror::Error;

pub mod command;
pub mod manual_form;
pub mod url_form;

pub use manual_form::{ManualForm, ImageAttachment};
pub use url_form::UrlForm;

/// Validation failures shown inline by the input forms.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid URL")]
    EmptyUrl,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Product name is required")]
    MissingProductName,

    #[error("Price is required")]
    MissingPrice,

    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),

    #[error("Image is larger than 10MB ({0} bytes)")]
    ImageTooLarge(u64),

    #[error("Could not read image: {0}")]
    ImageUnreadable(String),
}

/// Raw product data handed to the orchestrator. The mock analysis ignores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SubmissionPayload {
    Url {
        url: String,
    },
    Manual {
        product_name: String,
        price: String,
        reviews: String,
        image: Option<ImageAttachment>,
    },
}

impl SubmissionPayload {
    pub fn describe(&self) -> String {
        match self {
            SubmissionPayload::Url { url } => format!("Product link: {}", url),
            SubmissionPayload::Manual { product_name, price, image, .. } => {
                let mut text = format!("Manual entry: {} at {}", product_name, price);
                if let Some(image) = image {
                    text.push_str(&format!(" (image: {})", image.file_name));
                }
                text
            }
        }
    }

    pub fn image_path(&self) -> Option<&PathBuf> {
        match self {
            SubmissionPayload::Manual { image: Some(image), .. } => Some(&image.path),
            _ => None,
        }
    }
}
