//! UI building blocks
//!
//! - Mode selector buttons (mode_picker.rs)
//! - Verdict panel (verdict.rs)

pub mod mode_picker;
pub mod verdict;
