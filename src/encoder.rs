//! Image acquisition checks and base64 encoding.

use base64::Engine;
use base64::engine::general_purpose;
use serde::{Deserialize, Serialize};

use crate::constants::ACCEPTED_EXTENSIONS;

/// Base64-encodes raw image bytes (standard alphabet, padded).
pub fn encode_image(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Image formats the page accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// JPEG, from `.jpg` or `.jpeg` files
    Jpeg,
    /// PNG
    Png,
}

impl ImageKind {
    /// MIME type used in data URIs
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    fn sniff(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }
}

/// Why an acquired image was refused.
#[derive(Debug, Eq, PartialEq)]
pub enum ImageError {
    /// No bytes were sent
    Empty,
    /// The filename's extension is not jpg, jpeg or png
    UnsupportedExtension(String),
    /// The content is not a JPEG or PNG
    UnsupportedFormat,
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "No image data was provided"),
            Self::UnsupportedExtension(ext) => write!(
                f,
                "Unsupported file type .{ext}, expected one of {}",
                ACCEPTED_EXTENSIONS.join(", ")
            ),
            Self::UnsupportedFormat => write!(f, "The file is not a JPEG or PNG image"),
        }
    }
}

impl std::error::Error for ImageError {}

/// Raw bytes of an uploaded, captured or downloaded image.
#[derive(Clone, Debug)]
pub struct ImageBytes {
    bytes: Vec<u8>,
    kind: ImageKind,
}

impl ImageBytes {
    /// Checks the filename extension (when there is one) and the content.
    pub fn new(bytes: Vec<u8>, filename: Option<&str>) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if let Some(ext) = filename
            .and_then(|name| std::path::Path::new(name).extension())
            .and_then(|ext| ext.to_str())
        {
            let ext = ext.to_ascii_lowercase();
            if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
                return Err(ImageError::UnsupportedExtension(ext));
            }
        }
        let kind = ImageKind::sniff(&bytes).ok_or(ImageError::UnsupportedFormat)?;
        Ok(Self { bytes, kind })
    }

    /// Encodes the bytes for embedding in a JSON request.
    pub fn encode(&self) -> EncodedImage {
        EncodedImage {
            kind: self.kind,
            data: encode_image(&self.bytes),
        }
    }
}

/// Base64 payload of an image, plus the format it was sniffed as.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EncodedImage {
    kind: ImageKind,
    data: String,
}

impl EncodedImage {
    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.kind.mime(), self.data)
    }
}
