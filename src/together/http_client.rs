use super::{client::ensure_success, requester::ImageRequester};
use crate::{
    config::TogetherConfig,
    error::{ImageGenError, Result},
    models::{GenerationRequest, GenerationResult, ImagesResponse, RequestMethod},
};
use async_trait::async_trait;
use serde_json::json;

/// Requests images with a hand-built POST to the images endpoint and asks for
/// the JPEG bytes inline as base64.
#[derive(Clone)]
pub struct HttpImageClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpImageClient {
    pub fn new(config: &TogetherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: config.http_client()?,
            endpoint: config.images_endpoint(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn build_payload(request: &GenerationRequest) -> serde_json::Value {
        json!({
            "model": request.model,
            "prompt": request.prompt,
            "steps": request.steps,
            "n": request.n,
            "height": request.height,
            "width": request.width,
            "guidance": request.guidance,
            "output_format": "jpeg",
            "response_format": "base64"
        })
    }
}

#[async_trait]
impl ImageRequester for HttpImageClient {
    async fn request_image(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;

        let payload = Self::build_payload(request);
        log::info!("Generating image via direct HTTP with model: {}", request.model);
        log::debug!("Image generation request payload: {}", payload);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let body = response.text().await?;

        let parsed: ImagesResponse = serde_json::from_str(&body).map_err(|e| {
            ImageGenError::ProviderError(format!("Malformed response from provider: {}", e))
        })?;

        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ImageGenError::ProviderError("No image data received from API".into()))?;

        let b64 = first
            .b64_json
            .filter(|data| !data.trim().is_empty())
            .ok_or_else(|| {
                ImageGenError::ProviderError("No base64 image data received from API".into())
            })?;

        log::debug!("Received {} characters of base64 image data", b64.len());
        Ok(GenerationResult::Base64(b64))
    }

    fn method(&self) -> RequestMethod {
        RequestMethod::Http
    }
}
