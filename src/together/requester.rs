use crate::{
    error::Result,
    models::{GenerationRequest, GenerationResult, RequestMethod},
};
use async_trait::async_trait;

/// One way of asking the provider for an image.
///
/// Implementations validate the request before touching the network and map
/// every transport or payload problem to `ProviderError`.
#[async_trait]
pub trait ImageRequester: Send + Sync {
    async fn request_image(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    fn method(&self) -> RequestMethod;
}
