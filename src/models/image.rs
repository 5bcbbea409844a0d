use std::path::PathBuf;

use serde::Serialize;

use crate::error::{GeminiError, Result};

/// Aspect ratios the API accepts.
pub const VALID_ASPECT_RATIOS: [&str; 10] = [
    "1:1", "2:3", "3:2", "3:4", "4:3", "4:5", "5:4", "9:16", "16:9", "21:9",
];

/// Output size tiers, Pro model only. Case-sensitive, uppercase required.
pub const VALID_RESOLUTIONS: [&str; 3] = ["1K", "2K", "4K"];

pub const DEFAULT_ASPECT_RATIO: &str = "16:9";
pub const DEFAULT_RESOLUTION: &str = "2K";
pub const DEFAULT_MODEL: &str = "pro";
pub const DEFAULT_OUTPUT_DIR: &str = "generated_images";

/// What the Flash model emits regardless of any requested resolution.
pub const FLASH_NATIVE_SIZE: &str = "1024px";

/// The two supported model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageModel {
    /// Professional quality, resolution tiers up to 4K.
    Pro,
    /// Faster, fixed 1024px output.
    Flash,
}

impl ImageModel {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "pro" => Some(ImageModel::Pro),
            "flash" => Some(ImageModel::Flash),
            _ => None,
        }
    }

    /// The service-side model identifier.
    pub fn id(&self) -> &'static str {
        match self {
            ImageModel::Pro => "gemini-3-pro-image-preview",
            ImageModel::Flash => "gemini-2.5-flash-image",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub output_path: Option<PathBuf>,
    pub aspect_ratio: String,
    pub resolution: String,
    pub model: String,
    pub input_image_path: Option<PathBuf>,
    pub use_search: bool,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        ImageGenerationRequest {
            prompt: prompt.into(),
            output_path: None,
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            resolution: DEFAULT_RESOLUTION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            input_image_path: None,
            use_search: false,
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }

    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = resolution.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Reference image for editing / style transfer.
    pub fn with_input_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_image_path = Some(path.into());
        self
    }

    /// Enable Google Search grounding. Recommended with the Pro model, but
    /// not checked against model choice.
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.use_search = enabled;
        self
    }

    /// Fail-fast parameter validation, performed before any network call.
    ///
    /// The resolution is checked for every model even though only Pro
    /// consumes it.
    pub fn validate(&self) -> Result<ImageModel> {
        if !VALID_ASPECT_RATIOS.contains(&self.aspect_ratio.as_str()) {
            return Err(GeminiError::InvalidAspectRatio(self.aspect_ratio.clone()));
        }

        if !VALID_RESOLUTIONS.contains(&self.resolution.as_str()) {
            return Err(GeminiError::InvalidResolution(self.resolution.clone()));
        }

        let model = ImageModel::from_key(&self.model)
            .ok_or_else(|| GeminiError::InvalidModel(self.model.clone()))?;

        if let Some(path) = &self.input_image_path {
            if !path.exists() {
                return Err(GeminiError::InputImageNotFound(path.clone()));
            }
        }

        Ok(model)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationResponse {
    /// Absolute path of the saved image.
    pub filepath: PathBuf,
    pub filename: String,
    /// Resolved service model identifier.
    pub model: String,
    pub aspect_ratio: String,
    /// The requested tier for Pro, `1024px` for Flash.
    pub resolution: String,
    /// Last text part the model returned, if any.
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let request = ImageGenerationRequest::new("a fluffy owl");
        assert_eq!(request.aspect_ratio, "16:9");
        assert_eq!(request.resolution, "2K");
        assert_eq!(request.model, "pro");
        assert!(request.output_path.is_none());
        assert!(request.input_image_path.is_none());
        assert!(!request.use_search);
    }

    #[test]
    fn every_listed_aspect_ratio_validates() {
        for ratio in VALID_ASPECT_RATIOS {
            let request = ImageGenerationRequest::new("x").with_aspect_ratio(ratio);
            assert!(request.validate().is_ok(), "rejected {ratio}");
        }
    }

    #[test]
    fn unknown_aspect_ratio_is_rejected() {
        let request = ImageGenerationRequest::new("x").with_aspect_ratio("7:5");
        assert!(matches!(
            request.validate(),
            Err(GeminiError::InvalidAspectRatio(r)) if r == "7:5"
        ));
    }

    #[test]
    fn lowercase_resolution_is_rejected() {
        for bad in ["1k", "2k", "4k", "8K", "2048"] {
            let request = ImageGenerationRequest::new("x").with_resolution(bad);
            assert!(
                matches!(request.validate(), Err(GeminiError::InvalidResolution(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn unknown_model_key_is_rejected() {
        let request = ImageGenerationRequest::new("x").with_model("ultra");
        assert!(matches!(
            request.validate(),
            Err(GeminiError::InvalidModel(m)) if m == "ultra"
        ));
    }

    #[test]
    fn missing_input_image_is_rejected_with_path() {
        let request =
            ImageGenerationRequest::new("x").with_input_image("/definitely/not/here.png");
        match request.validate() {
            Err(GeminiError::InputImageNotFound(path)) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.png"));
            }
            other => panic!("expected InputImageNotFound, got {other:?}"),
        }
    }

    #[test]
    fn aspect_ratio_is_checked_before_model() {
        // Both invalid: the aspect ratio error must win.
        let request = ImageGenerationRequest::new("x")
            .with_aspect_ratio("0:0")
            .with_model("ultra");
        assert!(matches!(
            request.validate(),
            Err(GeminiError::InvalidAspectRatio(_))
        ));
    }

    #[test]
    fn model_keys_map_to_service_ids() {
        assert_eq!(
            ImageModel::from_key("pro").unwrap().id(),
            "gemini-3-pro-image-preview"
        );
        assert_eq!(
            ImageModel::from_key("flash").unwrap().id(),
            "gemini-2.5-flash-image"
        );
        assert!(ImageModel::from_key("Pro").is_none());
    }
}
