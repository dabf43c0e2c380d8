//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use url::Url;

use crate::constants::DEFAULT_API_BASE;
use crate::openai::OpenAiConfig;
use crate::selector::InputStrategy;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "VISIONWEB_DEBUG")]
    /// Enable debug logging. Env: VISIONWEB_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "8501", env = "VISIONWEB_PORT")]
    /// http listener, defaults to `8501`.
    /// Env: VISIONWEB_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "VISIONWEB_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: VISIONWEB_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    /// Bearer credential passed through to OpenAI.
    /// Env: OPENAI_API_KEY
    pub openai_api_key: String,

    #[clap(long, default_value = DEFAULT_API_BASE, env = "OPENAI_API_BASE")]
    /// Base URL of the OpenAI REST API.
    /// Env: OPENAI_API_BASE
    pub api_base: Url,

    #[clap(long, default_value = "gpt-4o", env = "VISIONWEB_VISION_MODEL")]
    /// Model used to answer questions about images.
    pub vision_model: String,

    #[clap(long, default_value = "dall-e-3", env = "VISIONWEB_IMAGE_MODEL")]
    /// Model used to generate images.
    pub image_model: String,

    #[clap(long, value_enum, default_value = "full", env = "VISIONWEB_INPUT_MODE")]
    /// Which image sources the page offers: `upload-only` or `full`
    /// (upload, generate, capture).
    pub input_mode: InputStrategy,

    #[clap(long, default_value = "60", env = "VISIONWEB_SESSION_IDLE_MINUTES")]
    /// Minutes of inactivity before a browser session is dropped.
    pub session_idle_minutes: u32,
}

impl CliOptions {
    /// Connection settings for the OpenAI client.
    pub fn openai_config(&self) -> OpenAiConfig {
        OpenAiConfig {
            api_key: self.openai_api_key.clone(),
            api_base: self.api_base.clone(),
            vision_model: self.vision_model.clone(),
            image_model: self.image_model.clone(),
        }
    }
}
