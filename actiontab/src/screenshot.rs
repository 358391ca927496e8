use image::ImageFormat;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::PredictionError;

/// A screenshot materialized as a uniquely named PNG on disk.
///
/// Model runtimes take image paths, not buffers. The file is deleted when this
/// value is dropped, so it lives exactly as long as one prediction.
pub struct ScreenshotFile {
    file: NamedTempFile,
}

impl ScreenshotFile {
    /// Decode `bytes` (any format the `image` crate understands) and re-encode
    /// them as PNG into a fresh temp file.
    pub fn write(bytes: &[u8]) -> Result<Self, PredictionError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| PredictionError::ImageEncodeFailure(format!("decode: {e}")))?;

        let file = tempfile::Builder::new()
            .prefix("actiontab-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| PredictionError::ImageEncodeFailure(format!("create temp file: {e}")))?;

        image
            .save_with_format(file.path(), ImageFormat::Png)
            .map_err(|e| PredictionError::ImageEncodeFailure(format!("encode png: {e}")))?;

        debug!(
            "Screenshot {}x{} written to {}",
            image.width(),
            image.height(),
            file.path().display()
        );
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
