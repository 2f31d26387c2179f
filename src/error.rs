use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageGenError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Decode error: {0}")]
    DecodeError(String),
    #[error("Filesystem error: {0}")]
    FilesystemError(String),
}

impl ImageGenError {
    /// Stable label for the error kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ImageGenError::MissingCredential(_) => "missing_credential",
            ImageGenError::ConfigError(_) => "config",
            ImageGenError::InvalidRequest(_) => "invalid_request",
            ImageGenError::ProviderError(_) => "provider",
            ImageGenError::DecodeError(_) => "decode",
            ImageGenError::FilesystemError(_) => "filesystem",
        }
    }
}

impl From<reqwest::Error> for ImageGenError {
    fn from(e: reqwest::Error) -> Self {
        ImageGenError::ProviderError(e.to_string())
    }
}

impl From<std::io::Error> for ImageGenError {
    fn from(e: std::io::Error) -> Self {
        ImageGenError::FilesystemError(e.to_string())
    }
}

impl From<base64::DecodeError> for ImageGenError {
    fn from(e: base64::DecodeError) -> Self {
        ImageGenError::DecodeError(format!("invalid base64 payload: {}", e))
    }
}

impl From<image::ImageError> for ImageGenError {
    fn from(e: image::ImageError) -> Self {
        ImageGenError::DecodeError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImageGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImageGenError::MissingCredential("TOGETHER_API_KEY".into());
        assert_eq!(err.to_string(), "Missing credential: TOGETHER_API_KEY");

        let err = ImageGenError::ProviderError("No image data returned".into());
        assert_eq!(err.to_string(), "Provider error: No image data returned");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ImageGenError::DecodeError("x".into()).kind(), "decode");
        assert_eq!(ImageGenError::FilesystemError("x".into()).kind(), "filesystem");
        assert_eq!(
            ImageGenError::MissingCredential("x".into()).kind(),
            "missing_credential"
        );
    }

    #[test]
    fn test_io_error_maps_to_filesystem() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ImageGenError = io.into();
        assert!(matches!(err, ImageGenError::FilesystemError(_)));
    }

    #[test]
    fn test_base64_error_maps_to_decode() {
        use base64::Engine;
        let err: ImageGenError = base64::engine::general_purpose::STANDARD
            .decode("!!not base64!!")
            .unwrap_err()
            .into();
        assert!(matches!(err, ImageGenError::DecodeError(_)));
    }

    #[test]
    fn test_image_errors_map_to_decode() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: ImageGenError = image::ImageError::IoError(eof).into();
        assert!(matches!(err, ImageGenError::DecodeError(_)));

        let err: ImageGenError = image::load_from_memory(b"not an image").unwrap_err().into();
        assert!(matches!(err, ImageGenError::DecodeError(_)));
    }
}
