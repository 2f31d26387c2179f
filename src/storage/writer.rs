use crate::{
    config::TogetherConfig,
    decoder::DecodedImage,
    error::{ImageGenError, Result},
};
use std::fs;
use std::path::PathBuf;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Local time at second granularity, e.g. `20240101_120000`.
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn file_name(method_tag: &str, timestamp: &str) -> String {
    format!("generated_image_{}_{}.png", method_tag, timestamp)
}

/// Writes decoded images as PNG files into a single output directory.
#[derive(Debug, Clone)]
pub struct ImageWriter {
    output_dir: PathBuf,
}

impl ImageWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &TogetherConfig) -> Self {
        Self::new(config.output_dir.clone())
    }

    pub fn ensure_output_directory(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ImageGenError::FilesystemError(format!(
                "failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;
        Ok(self.output_dir.clone())
    }

    pub fn output_path(&self, method_tag: &str, timestamp: &str) -> PathBuf {
        self.output_dir.join(file_name(method_tag, timestamp))
    }

    /// Saves `image` as PNG. An existing file at the same path is replaced.
    pub fn save(&self, image: &DecodedImage, method_tag: &str, timestamp: &str) -> Result<PathBuf> {
        self.ensure_output_directory()?;

        let path = self.output_path(method_tag, timestamp);
        let bytes = image.to_png_bytes()?;

        fs::write(&path, bytes).map_err(|e| {
            ImageGenError::FilesystemError(format!("failed to write {}: {}", path.display(), e))
        })?;

        log::info!("💾 Image saved to: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn sample_image() -> DecodedImage {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(4, 4))
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        decode(&buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_file_name_is_deterministic() {
        let writer = ImageWriter::new("images");
        assert_eq!(
            writer.output_path("sdk", "20240101_120000"),
            PathBuf::from("images/generated_image_sdk_20240101_120000.png")
        );
        assert_eq!(
            file_name("http", "20240101_120000"),
            "generated_image_http_20240101_120000.png"
        );
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.as_bytes()[8], b'_');
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_ensure_output_directory_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = ImageWriter::new(tmp.path().join("images"));

        let first = writer.ensure_output_directory().unwrap();
        let second = writer.ensure_output_directory().unwrap();

        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_ensure_output_directory_fails_on_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("images");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = ImageWriter::new(&blocker).ensure_output_directory().unwrap_err();
        assert!(matches!(err, ImageGenError::FilesystemError(_)));
    }

    #[test]
    fn test_save_writes_png_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = ImageWriter::new(tmp.path().join("images"));
        let image = sample_image();

        let path = writer.save(&image, "sdk", "20240101_120000").unwrap();
        assert_eq!(
            path,
            tmp.path()
                .join("images")
                .join("generated_image_sdk_20240101_120000.png")
        );

        let again = writer.save(&image, "sdk", "20240101_120000").unwrap();
        assert_eq!(path, again);

        let written = decode(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(written.source_format(), ImageFormat::Png);
        assert_eq!(written.width(), 4);
    }
}
