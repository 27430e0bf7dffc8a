//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the intake/rating layers and the UI layer.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use iced::widget::image::Handle;

use super::mode::Mode;

/// A photo picked by the user
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Where the photo was loaded from
    pub path: PathBuf,
    /// Raw file bytes, shared with in-flight requests
    pub bytes: Arc<Vec<u8>>,
    /// Declared media type (e.g. "image/png")
    pub media_type: &'static str,
}

impl UploadedImage {
    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Locally renderable version of the selected photo
#[derive(Debug, Clone)]
pub struct Preview {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Preview derivation progress for the current photo
#[derive(Debug, Clone)]
pub enum PreviewState {
    /// Decoding in the background
    Pending,
    Ready(Preview),
    /// Decoding failed; the raw file is still kept for rating
    Failed(String),
}

/// The verdict returned for one photo and mode
#[derive(Debug, Clone, PartialEq)]
pub struct RatingResult {
    /// Free-text verdict as returned by the model
    pub verdict: String,
    /// Mode that was active when the request started
    pub mode: Mode,
    pub rated_at: DateTime<Local>,
}

impl RatingResult {
    pub fn new(verdict: String, mode: Mode) -> Self {
        Self {
            verdict,
            mode,
            rated_at: Local::now(),
        }
    }

    /// Verdict lines in original order, one display block each
    pub fn lines(&self) -> Vec<&str> {
        verdict_lines(&self.verdict)
    }
}

/// Split a verdict on newlines, preserving order and blank lines
pub fn verdict_lines(verdict: &str) -> Vec<&str> {
    verdict
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
