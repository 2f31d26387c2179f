pub mod config;
pub mod decoder;
pub mod error;
pub mod logger;
pub mod models;
pub mod storage;
pub mod together;

pub use config::{load_credential, TogetherConfig};
pub use decoder::{decode, DecodedImage, ImageFetcher};
pub use error::{ImageGenError, Result};
pub use models::{
    known_image_models, GenerationRequest, GenerationResult, ModelInfo, RequestMethod,
};
pub use storage::{timestamp_now, ImageWriter};
pub use together::{
    HttpImageClient, ImageGenerator, ImageRequester, SdkImageClient, TogetherClient,
};
