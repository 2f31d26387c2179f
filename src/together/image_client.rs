use super::{
    client::{ImageGenerateParams, TogetherClient},
    requester::ImageRequester,
};
use crate::{
    error::{ImageGenError, Result},
    models::{GenerationRequest, GenerationResult, RequestMethod},
};
use async_trait::async_trait;

/// Requests images through the typed [`TogetherClient`]. The provider answers
/// with a download URL.
#[derive(Clone)]
pub struct SdkImageClient {
    client: TogetherClient,
}

impl SdkImageClient {
    pub fn new(client: TogetherClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageRequester for SdkImageClient {
    async fn request_image(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;

        log::info!("Generating image via SDK client with model: {}", request.model);

        let params = ImageGenerateParams::from(request);
        let response = self.client.images().generate(&params).await?;

        let first = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ImageGenError::ProviderError("No image data received from API".into()))?;

        let url = first
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ImageGenError::ProviderError("No image URL received from API".into()))?;

        log::debug!("Provider returned image URL: {}", url);
        Ok(GenerationResult::Url(url))
    }

    fn method(&self) -> RequestMethod {
        RequestMethod::Sdk
    }
}
