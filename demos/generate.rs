use std::process::ExitCode;
use togen::{timestamp_now, GenerationRequest, ImageGenerator, RequestMethod};

#[tokio::main]
async fn main() -> ExitCode {
    togen::logger::init().ok();
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }

    let generator = match ImageGenerator::from_env() {
        Ok(generator) => generator,
        Err(e) => {
            log::error!("Error generating image: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let request = GenerationRequest::new("A serene landscape with mountains and a lake at sunset")
        .with_steps(10);

    match generator
        .generate_and_save(RequestMethod::Sdk, &request, &timestamp_now())
        .await
    {
        Ok(path) => {
            println!("Image generated and saved as '{}'", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Error generating image: {}", e);
            ExitCode::FAILURE
        }
    }
}
