use crate::error::{ImageGenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MODEL: &str = "black-forest-labs/FLUX.1-dev";
pub const DEFAULT_STEPS: u32 = 20;
pub const DEFAULT_COUNT: u32 = 1;
pub const DEFAULT_DIMENSION: u32 = 1024;
pub const DEFAULT_GUIDANCE: f32 = 3.5;

const MAX_STEPS: u32 = 50;
const MAX_COUNT: u32 = 4;
const MIN_DIMENSION: u32 = 64;
const MAX_DIMENSION: u32 = 1792;
const DIMENSION_STEP: u32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: String,
    pub steps: u32,
    pub n: u32,
    pub height: u32,
    pub width: u32,
    pub guidance: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: DEFAULT_MODEL.to_string(),
            steps: DEFAULT_STEPS,
            n: DEFAULT_COUNT,
            height: DEFAULT_DIMENSION,
            width: DEFAULT_DIMENSION,
            guidance: DEFAULT_GUIDANCE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_count(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_guidance(mut self, guidance: f32) -> Self {
        self.guidance = guidance;
        self
    }

    /// Checks parameters against the ranges the provider accepts.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("prompt is empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("model is empty".into()));
        }
        if !(1..=MAX_STEPS).contains(&self.steps) {
            return Err(ImageGenError::InvalidRequest(format!(
                "steps must be between 1 and {}, got {}",
                MAX_STEPS, self.steps
            )));
        }
        if !(1..=MAX_COUNT).contains(&self.n) {
            return Err(ImageGenError::InvalidRequest(format!(
                "n must be between 1 and {}, got {}",
                MAX_COUNT, self.n
            )));
        }
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        if !self.guidance.is_finite() || self.guidance <= 0.0 {
            return Err(ImageGenError::InvalidRequest(format!(
                "guidance must be a positive number, got {}",
                self.guidance
            )));
        }
        Ok(())
    }
}

fn check_dimension(name: &str, value: u32) -> Result<()> {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) || value % DIMENSION_STEP != 0 {
        return Err(ImageGenError::InvalidRequest(format!(
            "{} must be a multiple of {} between {} and {}, got {}",
            name, DIMENSION_STEP, MIN_DIMENSION, MAX_DIMENSION, value
        )));
    }
    Ok(())
}

/// What the provider handed back: a link to the image or the image itself.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Url(String),
    Base64(String),
}

/// Which request path produced an image. The tag ends up in the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Sdk,
    Http,
}

impl RequestMethod {
    pub fn tag(&self) -> &'static str {
        match self {
            RequestMethod::Sdk => "sdk",
            RequestMethod::Http => "http",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = GenerationRequest::new("A red circle on white background");
        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.steps, 20);
        assert_eq!(request.n, 1);
        assert_eq!((request.width, request.height), (1024, 1024));
        assert_eq!(request.guidance, 3.5);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let base = GenerationRequest::new("prompt");

        assert!(GenerationRequest::new("  ").validate().is_err());
        assert!(base.clone().with_model("").validate().is_err());
        assert!(base.clone().with_steps(0).validate().is_err());
        assert!(base.clone().with_steps(51).validate().is_err());
        assert!(base.clone().with_count(0).validate().is_err());
        assert!(base.clone().with_size(1000, 1024).validate().is_err());
        assert!(base.clone().with_size(1024, 0).validate().is_err());
        assert!(base.clone().with_guidance(0.0).validate().is_err());
        assert!(base.clone().with_guidance(f32::NAN).validate().is_err());

        let err = base.with_steps(0).validate().unwrap_err();
        assert!(matches!(err, ImageGenError::InvalidRequest(_)));
    }

    #[test]
    fn test_validate_accepts_supported_sizes() {
        let request = GenerationRequest::new("prompt").with_size(768, 1344);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_method_tags() {
        assert_eq!(RequestMethod::Sdk.tag(), "sdk");
        assert_eq!(RequestMethod::Http.to_string(), "http");
    }

    #[test]
    fn test_images_response_tolerates_missing_fields() {
        let parsed: ImagesResponse = serde_json::from_str(r#"{"data":[{}]}"#).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert!(parsed.data[0].url.is_none());
        assert!(parsed.data[0].b64_json.is_none());

        let empty: ImagesResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.data.is_empty());
    }
}
