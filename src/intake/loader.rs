//! Photo loader
//!
//! Reads the selected file as-is. No validation of type or size is done:
//! whatever the user picks is kept and sent, tagged with the best media
//! type we can determine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;
use tracing::debug;

use crate::error::IntakeError;
use crate::state::data::UploadedImage;

/// Media type assumed when neither the bytes nor the extension say otherwise
pub const FALLBACK_MEDIA_TYPE: &str = "image/jpeg";

/// Extensions offered in the file picker
pub const PICKER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff"];

/// Load a photo from disk
///
/// # Returns
/// * `Ok(UploadedImage)` - Raw bytes plus detected media type
/// * `Err(IntakeError::Read)` - The file could not be read
pub async fn load_image(path: PathBuf) -> Result<UploadedImage, IntakeError> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| IntakeError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let media_type = detect_media_type(&bytes, &path);
    debug!("Loaded {} ({} bytes, {})", path.display(), bytes.len(), media_type);

    Ok(UploadedImage {
        path,
        bytes: Arc::new(bytes),
        media_type,
    })
}

/// Determine the media type from magic bytes, then the file extension
pub fn detect_media_type(bytes: &[u8], path: &Path) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return media_type_for(format);
    }

    ImageFormat::from_path(path)
        .map(media_type_for)
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}

fn media_type_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Png => "image/png",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        other => other.to_mime_type(),
    }
}
