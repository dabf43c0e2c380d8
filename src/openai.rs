//! Thin client for the two OpenAI endpoints the page uses.
//!
//! Vision queries hand back whatever JSON the service returned, whatever the
//! status. Image generation returns a tagged result instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::constants::{
    CHAT_COMPLETIONS_PATH, GENERATED_IMAGE_QUALITY, GENERATED_IMAGE_SIZE, IMAGE_GENERATIONS_PATH,
    VISION_MAX_TOKENS,
};
use crate::encoder::EncodedImage;
use crate::error::VisionWebError;

/// Connection settings for [`OpenAiClient`].
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// Bearer credential
    pub api_key: String,
    /// REST base, eg. `https://api.openai.com/v1/`
    pub api_base: Url,
    /// Model answering vision queries
    pub vision_model: String,
    /// Model generating images
    pub image_model: String,
}

/// The image half of a vision query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImageSource {
    /// Sent inline as a base64 data URI
    Inline(EncodedImage),
    /// Sent as a URL the service fetches itself
    Remote(String),
}

impl ImageSource {
    /// Value for the `image_url.url` field
    pub fn url(&self) -> String {
        match self {
            Self::Inline(image) => image.data_uri(),
            Self::Remote(url) => url.clone(),
        }
    }
}

// -----------------------------
// Chat completions (vision)
// -----------------------------

/// Request body for POST /v1/chat/completions
#[derive(Serialize, Debug)]
pub struct VisionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'static str,
    content: [ContentPart<'a>; 2],
}

#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Debug)]
struct ImageUrl {
    url: String,
}

impl<'a> VisionRequest<'a> {
    /// One user message: the question, then the image.
    pub fn new(model: &'a str, question: &'a str, image: &ImageSource) -> Self {
        Self {
            model,
            messages: [ChatMessage {
                role: "user",
                content: [
                    ContentPart::Text { text: question },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: image.url() },
                    },
                ],
            }],
            max_tokens: VISION_MAX_TOKENS,
        }
    }
}

// -----------------------------
// Images API
// -----------------------------

/// Request body for POST /v1/images/generations
#[derive(Serialize, Debug)]
struct ImagesGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImagesGenerateResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    message: String,
}

/// A successfully generated image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedImage {
    /// Where the service is hosting the image
    pub url: String,
    /// The prompt as rewritten by the service, if it did
    pub revised_prompt: Option<String>,
}

/// Why image generation produced no image.
#[derive(Debug, Eq, PartialEq)]
pub enum GenerationError {
    /// Nothing to generate from
    EmptyPrompt,
    /// The request never got a response
    Transport(String),
    /// The service answered with an error
    Api {
        /// HTTP status
        status: u16,
        /// `error.message` from the body, or the raw body
        message: String,
    },
    /// The success body wasn't the expected JSON
    Decode(String),
    /// The response held no image URL
    MissingImage,
    /// The returned URL wasn't an http(s) URL
    InvalidUrl(String),
}

impl GenerationError {
    /// The underlying message, without the prefix [`std::fmt::Display`] adds.
    pub fn message(&self) -> &str {
        match self {
            Self::EmptyPrompt => "Enter a prompt to generate an image",
            Self::MissingImage => "No image data returned",
            Self::Transport(message)
            | Self::Decode(message)
            | Self::InvalidUrl(message)
            | Self::Api { message, .. } => message,
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPrompt | Self::MissingImage => f.write_str(self.message()),
            Self::Transport(message) => write!(f, "Request to the Images API failed: {message}"),
            Self::Api { status, message } => write!(f, "Images API error {status}: {message}"),
            Self::Decode(message) => write!(f, "Could not read the Images API response: {message}"),
            Self::InvalidUrl(url) => write!(f, "Images API returned an invalid URL: {url}"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Calls the chat completions and images endpoints.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Builds a client; a missing trailing slash on the API base is added.
    pub fn new(mut config: OpenAiConfig) -> Self {
        if !config.api_base.path().ends_with('/') {
            let path = format!("{}/", config.api_base.path());
            config.api_base.set_path(&path);
        }
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.config.api_base.join(path)
    }

    /// Asks `question` about `image`, returning the decoded JSON body as-is.
    ///
    /// The HTTP status is not inspected: an API error comes back as the
    /// service's own error JSON. Transport and decoding failures are errors.
    #[instrument(skip_all, fields(model = %self.config.vision_model))]
    pub async fn ask_vision(
        &self,
        question: &str,
        image: &ImageSource,
    ) -> Result<Value, VisionWebError> {
        let body = VisionRequest::new(&self.config.vision_model, question, image);
        let resp = self
            .http
            .post(self.endpoint(CHAT_COMPLETIONS_PATH)?)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            debug!("Vision query returned {}", status);
        } else {
            warn!("Vision query returned {}", status);
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            VisionWebError::Upstream(format!(
                "Failed to parse chat completions JSON ({status}): {err}"
            ))
        })
    }

    /// Requests one image for `prompt`.
    #[instrument(skip_all, fields(model = %self.config.image_model))]
    pub async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        let req_body = ImagesGenerateRequest {
            model: &self.config.image_model,
            prompt,
            n: 1,
            size: GENERATED_IMAGE_SIZE,
            quality: GENERATED_IMAGE_QUALITY,
        };
        let endpoint = self
            .endpoint(IMAGE_GENERATIONS_PATH)
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let resp = self
            .http
            .post(endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&req_body)
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ApiErrorBody>(&bytes) {
                Ok(body) => body.error.message,
                Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
            };
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ImagesGenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|err| GenerationError::Decode(err.to_string()))?;
        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or(GenerationError::MissingImage)?;
        let url = first.url.ok_or(GenerationError::MissingImage)?;

        match Url::parse(&url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(GenerationError::InvalidUrl(url)),
        }
        if let Some(revised_prompt) = first.revised_prompt.as_deref() {
            debug!("Revised prompt from OpenAI: {revised_prompt}");
        }

        Ok(GeneratedImage {
            url,
            revised_prompt: first.revised_prompt,
        })
    }

    /// Downloads the bytes at `url`, failing on a non-success status.
    #[instrument(skip(self))]
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, VisionWebError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(VisionWebError::Upstream(format!(
                "Image download error {status}"
            )));
        }
        Ok(resp.bytes().await?.to_vec())
    }
}
