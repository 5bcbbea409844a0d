//! # nanobanana
//!
//! Client library and CLI for Google's Gemini image models
//! (`gemini-3-pro-image-preview` and `gemini-2.5-flash-image`).
//!
//! Request parameters are validated before anything touches the network, the
//! single `generateContent` call is delegated to the service, and the
//! returned image is written to disk under a timestamped name unless the
//! caller picked a path.
//!
//! ```rust,no_run
//! use nanobanana::{GeminiClient, GeminiConfig, ImageGenerationRequest};
//!
//! #[tokio::main]
//! async fn main() -> nanobanana::Result<()> {
//!     let client = GeminiClient::new(GeminiConfig::from_env())?;
//!
//!     let request = ImageGenerationRequest::new("a fluffy owl in a moonlit forest")
//!         .with_aspect_ratio("3:4")
//!         .with_resolution("4K");
//!
//!     let result = client.image().generate(request).await?;
//!     println!("saved to {}", result.filepath.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod output;

pub use config::GeminiConfig;
pub use error::{GeminiError, Result};
pub use gemini::{GeminiClient, ImageClient};
pub use models::*;
