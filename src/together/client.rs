use crate::{
    config::TogetherConfig,
    error::{ImageGenError, Result},
    models::{GenerationRequest, ImagesResponse},
};
use serde::Serialize;

/// Typed client for the Together REST API.
///
/// Callers describe what they want with [`ImageGenerateParams`]; request
/// construction, authentication and response parsing stay in here.
#[derive(Clone)]
pub struct TogetherClient {
    http: reqwest::Client,
    config: TogetherConfig,
}

impl TogetherClient {
    pub fn new(config: TogetherConfig) -> Result<Self> {
        config.validate()?;
        let http = config.http_client()?;
        Ok(Self { http, config })
    }

    pub fn images(&self) -> Images<'_> {
        Images { client: self }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerateParams {
    pub prompt: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
}

impl From<&GenerationRequest> for ImageGenerateParams {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            prompt: request.prompt.clone(),
            model: request.model.clone(),
            steps: Some(request.steps),
            n: Some(request.n),
            height: Some(request.height),
            width: Some(request.width),
            guidance: Some(request.guidance),
            response_format: None,
            output_format: None,
        }
    }
}

pub struct Images<'a> {
    client: &'a TogetherClient,
}

impl Images<'_> {
    pub async fn generate(&self, params: &ImageGenerateParams) -> Result<ImagesResponse> {
        let endpoint = self.client.config.images_endpoint();
        log::debug!("POST {} (model: {})", endpoint, params.model);

        let response = self
            .client
            .http
            .post(&endpoint)
            .bearer_auth(&self.client.config.api_key)
            .json(params)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            ImageGenError::ProviderError(format!("Malformed response from provider: {}", e))
        })
    }
}

/// Turns a non-2xx response into a `ProviderError`, preferring the provider's
/// own `error.message` when the body carries one.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    Err(ImageGenError::ProviderError(format!(
        "HTTP {}: {}",
        status.as_u16(),
        message
    )))
}
