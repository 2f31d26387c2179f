use crate::{
    error::{ImageGenError, Result},
    models::GenerationResult,
    together::client::ensure_success,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// A decoded image, ready to be written out.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    source_format: ImageFormat,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn source_format(&self) -> ImageFormat {
        self.source_format
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| ImageGenError::FilesystemError(format!("failed to encode PNG: {}", e)))?;
        Ok(buffer.into_inner())
    }
}

pub fn decode(bytes: &[u8]) -> Result<DecodedImage> {
    if bytes.is_empty() {
        return Err(ImageGenError::DecodeError("image payload is empty".into()));
    }

    let source_format = image::guess_format(bytes)
        .map_err(|_| ImageGenError::DecodeError("unrecognized image format".into()))?;

    let image = image::load_from_memory_with_format(bytes, source_format)?;

    Ok(DecodedImage {
        image,
        source_format,
    })
}

/// Decodes an inline base64 payload. A `data:image/...;base64,` prefix is
/// tolerated.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let trimmed = data.trim();
    let payload = match trimmed.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, b64)| b64).unwrap_or(rest),
        None => trimmed,
    };
    Ok(STANDARD.decode(payload)?)
}

/// Resolves a [`GenerationResult`] into raw image bytes.
#[derive(Clone)]
pub struct ImageFetcher {
    http: reqwest::Client,
}

impl ImageFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Downloading image from {}", url);

        let response = self.http.get(url).send().await?;
        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;

        log::debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    pub async fn fetch(&self, result: &GenerationResult) -> Result<Vec<u8>> {
        match result {
            GenerationResult::Url(url) => self.download(url).await,
            GenerationResult::Base64(data) => decode_base64(data),
        }
    }

    pub async fn fetch_and_decode(&self, result: &GenerationResult) -> Result<DecodedImage> {
        let bytes = self.fetch(result).await?;
        decode(&bytes)
    }
}
