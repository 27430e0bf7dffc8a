//! State management module
//!
//! This module handles all application state, including:
//! - Feedback tone presets (mode.rs)
//! - Shared data structures (data.rs)
//! - The application state machine (app.rs)

pub mod app;
pub mod data;
pub mod mode;
