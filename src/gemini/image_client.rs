use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::{
    config::GeminiConfig,
    error::{GeminiError, Result},
    models::{
        Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        ImageConfig, ImageGenerationRequest, ImageGenerationResponse, ImageModel, Part,
        Tool, FLASH_NATIVE_SIZE,
    },
    output,
};

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    /// Generate an image and write it to disk.
    ///
    /// Parameters are validated before any network activity. The call itself
    /// is a single awaited POST with no client-imposed timeout; whatever the
    /// transport raises comes back as `GeminiError::Generation`.
    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        let model = request.validate()?;

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GeminiError::Config("No API key provided".into()))?;

        let payload = GenerateContentRequest {
            contents: vec![build_content(&request)?],
            generation_config: Some(build_generation_config(&request, model)),
            tools: request.use_search.then(|| vec![Tool::google_search()]),
        };

        log::info!("Generating image with model: {}", model.id());

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url,
            model.id()
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GeminiError::Generation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Generation(format!("HTTP {status}: {body}")));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Generation(e.to_string()))?;

        process_response(&parsed, &request, model, &output::default_output_dir())
    }
}

/// One user turn: the reference image first (when given), then the prompt.
fn build_content(request: &ImageGenerationRequest) -> Result<Content> {
    let mut parts = Vec::new();

    if let Some(path) = &request.input_image_path {
        let bytes =
            fs::read(path).map_err(|e| GeminiError::Generation(e.to_string()))?;
        parts.push(Part::inline_data(
            output::mime_from_path(path),
            BASE64.encode(bytes),
        ));
    }

    parts.push(Part::text(request.prompt.clone()));

    Ok(Content {
        role: Some("user".to_string()),
        parts,
    })
}

/// Both modalities are always requested; the resolution tier rides along only
/// for the Pro model, whatever the caller passed.
fn build_generation_config(
    request: &ImageGenerationRequest,
    model: ImageModel,
) -> GenerationConfig {
    GenerationConfig {
        response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
        image_config: Some(ImageConfig {
            aspect_ratio: request.aspect_ratio.clone(),
            image_size: (model == ImageModel::Pro).then(|| request.resolution.clone()),
        }),
    }
}

/// Map a service response onto the success/error outcome, saving image bytes
/// as they are encountered.
///
/// Parts are walked in order: every text part overwrites the running text,
/// every inline image part is decoded and written immediately. When several
/// images arrive the last one wins and earlier files are left behind.
fn process_response(
    response: &GenerateContentResponse,
    request: &ImageGenerationRequest,
    model: ImageModel,
    default_dir: &Path,
) -> Result<ImageGenerationResponse> {
    if response.candidates.is_empty() {
        return Err(GeminiError::NoCandidates);
    }

    let mut last_text: Option<String> = None;
    let mut saved_path = None;

    for part in response.parts() {
        if let Some(text) = &part.text {
            last_text = Some(text.clone());
        } else if let Some(blob) = &part.inline_data {
            let bytes = BASE64
                .decode(&blob.data)
                .map_err(|e| GeminiError::Generation(e.to_string()))?;

            let path = output::resolve_output_path(
                request.output_path.as_deref(),
                default_dir,
                blob.mime_type.as_deref(),
            )
            .map_err(|e| GeminiError::Generation(e.to_string()))?;

            output::save_image(&path, &bytes)
                .map_err(|e| GeminiError::Generation(e.to_string()))?;

            log::debug!("Saved image part to {}", path.display());
            saved_path = Some(path);
        }
    }

    let Some(path) = saved_path else {
        return Err(GeminiError::NoImage { text: last_text });
    };

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let filepath =
        fs::canonicalize(&path).map_err(|e| GeminiError::Generation(e.to_string()))?;

    Ok(ImageGenerationResponse {
        filepath,
        filename,
        model: model.id().to_string(),
        aspect_ratio: request.aspect_ratio.clone(),
        resolution: if model == ImageModel::Pro {
            request.resolution.clone()
        } else {
            FLASH_NATIVE_SIZE.to_string()
        },
        text: last_text,
    })
}
