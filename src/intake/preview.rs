//! Preview generation for the selected photo
//! Decodes and downscales on a blocking thread, then hands iced an RGBA handle

use std::sync::Arc;

use iced::widget::image::Handle;
use image::imageops::FilterType;

use crate::error::IntakeError;
use crate::state::data::Preview;

/// Longest edge of the on-screen preview
pub const PREVIEW_MAX_EDGE: u32 = 1024;

/// Derive a preview from the raw photo bytes
pub async fn derive_preview(bytes: Arc<Vec<u8>>) -> Result<Preview, IntakeError> {
    // Spawn blocking because decoding large photos is CPU-intensive
    tokio::task::spawn_blocking(move || derive_preview_blocking(&bytes))
        .await
        .map_err(|e| IntakeError::Join(e.to_string()))?
}

fn derive_preview_blocking(bytes: &[u8]) -> Result<Preview, IntakeError> {
    let img = image::load_from_memory(bytes).map_err(|e| IntakeError::Decode(e.to_string()))?;

    let img = if img.width() > PREVIEW_MAX_EDGE || img.height() > PREVIEW_MAX_EDGE {
        img.resize(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Preview {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
    })
}
