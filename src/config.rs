use crate::error::{ImageGenError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_VAR: &str = "TOGETHER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// Reads the named credential from the process environment.
///
/// The value is read on every call; absent, empty and whitespace-only values
/// are all reported as `MissingCredential`.
pub fn load_credential(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ImageGenError::MissingCredential(format!(
            "{} not found in environment variables",
            name
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct TogetherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub output_dir: PathBuf,
}

impl TogetherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        TogetherConfig {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_var(API_KEY_VAR)
    }

    pub fn from_env_var(name: &str) -> Result<Self> {
        let api_key = load_credential(name)?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn images_endpoint(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }

    /// Rejects an empty key even when the config was built by hand.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ImageGenError::MissingCredential(
                "API key is empty".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| ImageGenError::ConfigError(format!("failed to build HTTP client: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_credential_missing() {
        env::remove_var("TOGEN_TEST_MISSING_KEY");
        let err = load_credential("TOGEN_TEST_MISSING_KEY").unwrap_err();
        assert!(matches!(err, ImageGenError::MissingCredential(_)));
    }

    #[test]
    fn test_load_credential_empty() {
        env::set_var("TOGEN_TEST_EMPTY_KEY", "   ");
        let err = load_credential("TOGEN_TEST_EMPTY_KEY").unwrap_err();
        assert!(matches!(err, ImageGenError::MissingCredential(_)));
    }

    #[test]
    fn test_load_credential_present() {
        env::set_var("TOGEN_TEST_PRESENT_KEY", "tk-123");
        assert_eq!(load_credential("TOGEN_TEST_PRESENT_KEY").unwrap(), "tk-123");
    }

    #[test]
    fn test_config_builder() {
        let config = TogetherConfig::new("key")
            .with_base_url("http://localhost:9000/v1/")
            .with_timeout(Duration::from_secs(30))
            .with_output_dir("out");

        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(
            config.images_endpoint(),
            "http://localhost:9000/v1/images/generations"
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_config_defaults() {
        let config = TogetherConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_dir, PathBuf::from("images"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let config = TogetherConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(ImageGenError::MissingCredential(_))
        ));
    }
}
