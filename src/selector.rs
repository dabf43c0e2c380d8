//! Image source selection.
//!
//! The page runs under one [`InputStrategy`], which decides which
//! [`InputMode`]s a visitor may pick. Each browser session holds an
//! [`InputSelector`] with the active mode and at most one staged image.

use serde::{Deserialize, Serialize};

use crate::encoder::EncodedImage;

/// Which image sources the page offers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum InputStrategy {
    /// File upload only
    UploadOnly,
    /// Upload, generate or capture
    #[default]
    Full,
}

impl InputStrategy {
    /// Modes offered, in display order.
    pub fn modes(self) -> &'static [InputMode] {
        match self {
            Self::UploadOnly => &[InputMode::Upload],
            Self::Full => &[InputMode::Upload, InputMode::Generate, InputMode::Capture],
        }
    }

    /// Whether `mode` may be selected.
    pub fn allows(self, mode: InputMode) -> bool {
        self.modes().contains(&mode)
    }

    /// Mode a new session starts in.
    pub fn default_mode(self) -> InputMode {
        InputMode::Upload
    }

    /// Whether the generation form is available while `active` is selected.
    /// Upload-only pages always offer it next to the upload form.
    pub fn offers_generation(self, active: InputMode) -> bool {
        self == Self::UploadOnly || active == InputMode::Generate
    }
}

/// Where the image for the current interaction comes from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Choose a file
    Upload,
    /// Generate one from a prompt
    Generate,
    /// Take a picture with the device camera
    Capture,
}

impl InputMode {
    /// Form value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Generate => "generate",
            Self::Capture => "capture",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Upload => "Upload an image",
            Self::Generate => "Generate an image",
            Self::Capture => "Take a picture",
        }
    }

    /// Upload and capture produce image bytes; generate produces a URL.
    pub fn takes_image_bytes(self) -> bool {
        matches!(self, Self::Upload | Self::Capture)
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected selector operations.
#[derive(Debug, Eq, PartialEq)]
pub enum SelectorError {
    /// The strategy doesn't offer this mode
    ModeNotOffered(InputMode),
    /// The active mode doesn't take image bytes
    NoImageInput(InputMode),
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModeNotOffered(mode) => write!(f, "Input mode {mode} is not available"),
            Self::NoImageInput(mode) => write!(f, "Input mode {mode} does not accept image files"),
        }
    }
}

impl std::error::Error for SelectorError {}

/// An image acquired in a particular mode.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StagedImage {
    /// Mode that produced it
    pub mode: InputMode,
    /// Encoded content
    pub image: EncodedImage,
}

/// Active mode plus the image staged in it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct InputSelector {
    active: InputMode,
    staged: Option<StagedImage>,
}

impl InputSelector {
    /// Starts in the strategy's default mode with nothing staged.
    pub fn new(strategy: InputStrategy) -> Self {
        Self {
            active: strategy.default_mode(),
            staged: None,
        }
    }

    /// Currently active mode
    pub fn active(&self) -> InputMode {
        self.active
    }

    /// Switches mode. Moving to a different mode drops the staged image.
    pub fn select(
        &mut self,
        strategy: InputStrategy,
        mode: InputMode,
    ) -> Result<(), SelectorError> {
        if !strategy.allows(mode) {
            return Err(SelectorError::ModeNotOffered(mode));
        }
        if mode != self.active {
            self.active = mode;
            self.staged = None;
        }
        Ok(())
    }

    /// Stages an image for the active mode, replacing any previous one.
    pub fn acquire(&mut self, image: EncodedImage) -> Result<(), SelectorError> {
        if !self.active.takes_image_bytes() {
            return Err(SelectorError::NoImageInput(self.active));
        }
        self.staged = Some(StagedImage {
            mode: self.active,
            image,
        });
        Ok(())
    }

    /// The staged image, only if it came from the active mode.
    pub fn current(&self) -> Option<&EncodedImage> {
        self.staged
            .as_ref()
            .filter(|staged| staged.mode == self.active)
            .map(|staged| &staged.image)
    }

    /// Resets the selector when its mode is no longer offered, eg. after the
    /// server restarted with a narrower strategy.
    pub fn conform(&mut self, strategy: InputStrategy) {
        if !strategy.allows(self.active) {
            *self = Self::new(strategy);
        }
    }
}
