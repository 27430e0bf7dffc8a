//! Image intake module
//!
//! This module handles:
//! - Reading the selected photo from disk and detecting its media type
//! - Decoding a downscaled preview off the UI thread

pub mod loader;
pub mod preview;

pub use loader::load_image;
pub use preview::derive_preview;
