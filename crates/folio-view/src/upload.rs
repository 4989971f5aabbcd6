//! Profile picture validation and data-URI encoding.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("not an image file: {mime}")]
    NotAnImage { mime: String },
    #[error("file is {size} bytes, limit is {max}")]
    TooLarge { size: u64, max: u64 },
}

impl UploadError {
    /// Message shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            UploadError::NotAnImage { .. } => "Vui lòng chọn một tệp hình ảnh!",
            UploadError::TooLarge { .. } => "Kích thước ảnh không được vượt quá 5MB!",
        }
    }
}

pub fn validate_image(mime: &str, size: u64, max: u64) -> Result<(), UploadError> {
    if !mime.starts_with("image/") {
        return Err(UploadError::NotAnImage {
            mime: mime.to_owned(),
        });
    }
    if size > max {
        return Err(UploadError::TooLarge { size, max });
    }
    Ok(())
}

/// `data:<mime>;base64,<payload>` string for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri(String);

impl DataUri {
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    /// Accepts only base64 image data URIs with a decodable payload.
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        if !mime.starts_with("image/") {
            return None;
        }
        STANDARD.decode(payload).ok()?;
        Some(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
