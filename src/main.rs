use std::path::PathBuf;
use std::process;

use clap::Parser;

use nanobanana::logger::{self, LoggerConfig};
use nanobanana::models::{DEFAULT_ASPECT_RATIO, DEFAULT_MODEL, DEFAULT_RESOLUTION};
use nanobanana::{GeminiClient, GeminiConfig, GeminiError, ImageGenerationRequest, ImageModel};

/// Generate images with Google's Gemini image models (NanoBanana).
#[derive(Parser, Debug)]
#[command(
    name = "nanobanana",
    version,
    about = "Generate images using Google Gemini image models",
    after_help = "Valid aspect ratios: 1:1, 2:3, 3:2, 3:4, 4:3, 4:5, 5:4, 9:16, 16:9, 21:9\n\
                  Valid resolutions (pro only): 1K, 2K, 4K (must be uppercase)\n\n\
                  Models:\n    \
                  pro   - gemini-3-pro-image-preview (default, professional quality, 4K)\n    \
                  flash - gemini-2.5-flash-image (faster, 1024px)"
)]
struct Cli {
    /// Text description of the image to generate
    prompt: String,

    /// Output file path (auto-generated if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Aspect ratio
    #[arg(short = 'a', long = "aspect", default_value = DEFAULT_ASPECT_RATIO)]
    aspect_ratio: String,

    /// Resolution: 1K, 2K, or 4K (pro model only)
    #[arg(short, long, default_value = DEFAULT_RESOLUTION)]
    resolution: String,

    /// Model: pro or flash
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Input image path for editing/style transfer
    #[arg(short, long = "input")]
    input_image: Option<PathBuf>,

    /// Enable Google Search grounding for real-time data
    #[arg(long)]
    search: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_config(LoggerConfig::default()) {
        eprintln!("Warning: {e}");
    }

    match dotenv::dotenv() {
        Ok(_) => log::debug!(".env file loaded"),
        Err(_) => log::debug!("No .env file found, using system environment variables"),
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), GeminiError> {
    let truncated: String = cli.prompt.chars().take(80).collect();
    let ellipsis = if cli.prompt.chars().count() > 80 { "..." } else { "" };

    log::info!("🎨 Generating image...");
    if let Some(model) = ImageModel::from_key(&cli.model) {
        log::info!("   Model: {}", model.id());
    }
    log::info!("   Prompt: {truncated}{ellipsis}");
    log::info!("   Aspect: {}", cli.aspect_ratio);
    if cli.model == "pro" {
        log::info!("   Resolution: {}", cli.resolution);
    }
    if let Some(input) = &cli.input_image {
        log::info!("   Input image: {}", input.display());
    }
    if cli.search {
        log::info!("   Google Search: enabled");
    }

    let client = GeminiClient::new(GeminiConfig::from_env())?;

    let mut request = ImageGenerationRequest::new(cli.prompt)
        .with_aspect_ratio(cli.aspect_ratio)
        .with_resolution(cli.resolution)
        .with_model(cli.model)
        .with_search(cli.search);
    if let Some(output) = cli.output {
        request = request.with_output(output);
    }
    if let Some(input) = cli.input_image {
        request = request.with_input_image(input);
    }

    let timer = logger::timer("image generation");
    let result = client.image().generate(request).await?;
    timer.stop();

    println!("Success! Image saved to: {}", result.filepath.display());
    if let Some(text) = &result.text {
        println!("Model response: {text}");
    }

    Ok(())
}
