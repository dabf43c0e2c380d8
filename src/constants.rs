//! Shared constants for the OpenAI calls and the web surface
//!

/// Default OpenAI REST base, must end with a slash so endpoints join onto it.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1/";

/// Path of the chat completions endpoint, relative to the API base.
pub const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Path of the image generation endpoint, relative to the API base.
pub const IMAGE_GENERATIONS_PATH: &str = "images/generations";

/// Token limit sent with every vision query.
pub const VISION_MAX_TOKENS: u32 = 300;

/// Resolution requested from the image generation endpoint.
pub const GENERATED_IMAGE_SIZE: &str = "1024x1024";

/// Quality tier requested from the image generation endpoint.
pub const GENERATED_IMAGE_QUALITY: &str = "standard";

/// File extensions accepted for uploaded and captured images.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Filename offered for the generated image download.
pub const DOWNLOAD_FILENAME: &str = "generated_image.png";

/// MIME type of the generated image download.
pub const DOWNLOAD_MIME: &str = "image/png";

/// Largest request body accepted, covers multipart image uploads.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// How often expired sessions are swept from the session store.
pub const SESSION_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Page title shown at the top of every page.
pub const PAGE_TITLE: &str = "OpenAI Vision and Image Generation";

#[cfg(test)]
/// API key used against mocked endpoints in tests
pub const TEST_API_KEY: &str = "sk-test-key";
