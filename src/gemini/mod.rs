pub mod image_client;

use crate::{
    config::GeminiConfig,
    error::{GeminiError, Result},
};

pub use image_client::ImageClient;

/// Entry point for the Gemini API. Owns the HTTP transport and hands it to
/// task-specific sub-clients.
#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(GeminiError::Config(
                "No API key provided. Set GEMINI_API_KEY or GOOGLE_API_KEY.".into(),
            ));
        }

        let http = reqwest::Client::new();

        Ok(Self {
            image_client: ImageClient::new(http, config),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let result = GeminiClient::new(GeminiConfig::new());
        assert!(matches!(result, Err(GeminiError::Config(_))));
    }

    #[test]
    fn client_builds_with_key() {
        let config = GeminiConfig::new().with_api_key("test-key");
        assert!(GeminiClient::new(config).is_ok());
    }
}
