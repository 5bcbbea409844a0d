use std::path::PathBuf;

use thiserror::Error;

use crate::models::{VALID_ASPECT_RATIOS, VALID_RESOLUTIONS};

/// Every failure the client can produce. Parameter errors are raised before
/// any network activity; everything the transport or filesystem throws is
/// folded into `Generation`.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Invalid aspect ratio '{0}'. Valid options: {valid}", valid = VALID_ASPECT_RATIOS.join(", "))]
    InvalidAspectRatio(String),

    #[error("Invalid resolution '{0}'. Valid options: {valid} (must be uppercase)", valid = VALID_RESOLUTIONS.join(", "))]
    InvalidResolution(String),

    #[error("Invalid model '{0}'. Valid options: pro, flash")]
    InvalidModel(String),

    #[error("Input image not found: {}", .0.display())]
    InputImageNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No image generated. The prompt may have been blocked or failed.")]
    NoCandidates,

    /// The model answered with text only. The last text part seen is kept so
    /// callers can surface it.
    #[error("No image found in response. Model may have returned text only.")]
    NoImage { text: Option<String> },

    #[error("Generation failed: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, GeminiError>;
