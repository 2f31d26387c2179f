use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use togen::{
    config::{API_KEY_VAR, DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR},
    logger::{self, LogLevel, LoggerConfig},
    models::{DEFAULT_COUNT, DEFAULT_DIMENSION, DEFAULT_GUIDANCE, DEFAULT_MODEL, DEFAULT_STEPS},
    known_image_models, timestamp_now, GenerationRequest, ImageGenerator, RequestMethod,
    TogetherConfig,
};

#[derive(Parser)]
#[command(name = "togen")]
#[command(about = "Generate an image with Together.ai and save it as a timestamped PNG")]
#[command(version)]
struct Cli {
    /// The text prompt describing the image
    #[arg(short, long, default_value = "A red circle on white background")]
    prompt: String,

    /// Model identifier
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Number of diffusion steps
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    steps: u32,

    /// Number of images to request (only the first is saved)
    #[arg(short, default_value_t = DEFAULT_COUNT)]
    n: u32,

    /// Image width in pixels
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    height: u32,

    /// Guidance scale
    #[arg(long, default_value_t = DEFAULT_GUIDANCE)]
    guidance: f32,

    /// Which request path to use
    #[arg(long, value_enum, default_value = "both")]
    method: MethodArg,

    /// Directory the images are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Provider base URL
    #[arg(long, env = "TOGETHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (transport default when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Environment variable holding the API key
    #[arg(long, default_value = API_KEY_VAR)]
    api_key_env: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// List known image models and exit
    #[arg(long)]
    list_models: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Sdk,
    Http,
    Both,
}

impl MethodArg {
    fn methods(self) -> Vec<RequestMethod> {
        match self {
            MethodArg::Sdk => vec![RequestMethod::Sdk],
            MethodArg::Http => vec![RequestMethod::Http],
            MethodArg::Both => vec![RequestMethod::Sdk, RequestMethod::Http],
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    if let Err(e) = logger::init_with_config(LoggerConfig::new().with_level(level)) {
        eprintln!("{}", e);
    }

    match dotenv::dotenv() {
        Ok(path) => log::debug!("✅ .env file loaded from {}", path.display()),
        Err(_) => log::debug!("No .env file found, using process environment"),
    }

    if cli.list_models {
        for model in known_image_models() {
            println!("{:<40} {} ({})", model.id, model.name, model.provider);
        }
        return ExitCode::SUCCESS;
    }

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error generating image [{}]: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> togen::Result<()> {
    let mut config = TogetherConfig::from_env_var(&cli.api_key_env)?
        .with_base_url(&cli.base_url)
        .with_output_dir(&cli.output_dir);
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    logger::log_config_info(&config);

    let request = GenerationRequest::new(&cli.prompt)
        .with_model(&cli.model)
        .with_steps(cli.steps)
        .with_count(cli.n)
        .with_size(cli.width, cli.height)
        .with_guidance(cli.guidance);
    request.validate()?;

    let generator = ImageGenerator::new(config)?;
    generator.writer().ensure_output_directory()?;

    let timestamp = timestamp_now();
    for method in cli.method.methods() {
        log::info!("🎨 Requesting image via {} path", method);
        let path = generator
            .generate_and_save(method, &request, &timestamp)
            .await?;
        println!("Image generated and saved as '{}'", path.display());
    }

    Ok(())
}
