pub mod client;
pub mod http_client;
pub mod image_client;
pub mod requester;

use crate::{
    config::TogetherConfig,
    decoder::{DecodedImage, ImageFetcher},
    error::Result,
    logger,
    models::{GenerationRequest, RequestMethod},
    storage::ImageWriter,
};
use std::path::PathBuf;

pub use client::{ImageGenerateParams, Images, TogetherClient};
pub use http_client::HttpImageClient;
pub use image_client::SdkImageClient;
pub use requester::ImageRequester;

/// Wires both request paths to the decoder and the file writer.
#[derive(Clone)]
pub struct ImageGenerator {
    sdk_client: SdkImageClient,
    http_client: HttpImageClient,
    fetcher: ImageFetcher,
    writer: ImageWriter,
}

impl ImageGenerator {
    pub fn new(config: TogetherConfig) -> Result<Self> {
        config.validate()?;

        let together = TogetherClient::new(config.clone())?;
        let http_client = HttpImageClient::new(&config)?;
        let fetcher = ImageFetcher::new(config.http_client()?);

        Ok(Self {
            sdk_client: SdkImageClient::new(together),
            http_client,
            fetcher,
            writer: ImageWriter::from_config(&config),
        })
    }

    /// Reads `TOGETHER_API_KEY`; fails before any client is built when it is
    /// missing.
    pub fn from_env() -> Result<Self> {
        Self::new(TogetherConfig::from_env()?)
    }

    pub fn sdk(&self) -> &SdkImageClient {
        &self.sdk_client
    }

    pub fn http(&self) -> &HttpImageClient {
        &self.http_client
    }

    pub fn writer(&self) -> &ImageWriter {
        &self.writer
    }

    pub fn requester(&self, method: RequestMethod) -> &dyn ImageRequester {
        match method {
            RequestMethod::Sdk => &self.sdk_client,
            RequestMethod::Http => &self.http_client,
        }
    }

    /// Requests one image over `method` and decodes it.
    pub async fn generate(
        &self,
        method: RequestMethod,
        request: &GenerationRequest,
    ) -> Result<DecodedImage> {
        let requester = self.requester(method);
        let timer = logger::timer(&format!("{} image generation", requester.method()));

        let result = requester.request_image(request).await?;
        let image = self.fetcher.fetch_and_decode(&result).await?;
        timer.finish();

        log::info!(
            "🖼️  Decoded {}x{} {:?} image",
            image.width(),
            image.height(),
            image.source_format()
        );
        Ok(image)
    }

    pub async fn generate_and_save(
        &self,
        method: RequestMethod,
        request: &GenerationRequest,
        timestamp: &str,
    ) -> Result<PathBuf> {
        let image = self.generate(method, request).await?;
        let tag = self.requester(method).method().tag();
        self.writer.save(&image, tag, timestamp)
    }
}
