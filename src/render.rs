//! Turning service responses into something to show or save.

use std::io::Cursor;

use serde_json::Value;
use tracing::debug;

use crate::error::VisionWebError;
use crate::openai::OpenAiClient;

/// Pretty-prints a vision response for display, untouched otherwise.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Decodes an image (JPEG or PNG) and re-encodes it as PNG.
pub fn reencode_png(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let image = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    let mut output = Cursor::new(Vec::new());
    image.write_to(&mut output, image::ImageFormat::Png)?;
    Ok(output.into_inner())
}

/// Fetches a generated image and returns it as PNG bytes.
pub async fn download_png(client: &OpenAiClient, url: &str) -> Result<Vec<u8>, VisionWebError> {
    let bytes = client.fetch_image(url).await?;
    debug!("Fetched {} bytes of generated image", bytes.len());
    reencode_png(&bytes).map_err(|err| VisionWebError::Upstream(err.to_string()))
}
