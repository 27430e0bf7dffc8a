//! Feedback tone presets
//!
//! The set of modes is closed and fixed at build time. Each mode carries a
//! display label, a glyph for the selector, and the persona instruction that
//! steers the tone of the model's answer.

use crate::error::ConfigError;

/// A feedback tone preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Professional,
    #[default]
    Balanced,
    Hype,
    Roast,
}

impl Mode {
    /// All modes, in selector order
    pub const ALL: [Mode; 4] = [Mode::Professional, Mode::Balanced, Mode::Hype, Mode::Roast];

    /// Stable identifier, used in logs
    pub fn id(self) -> &'static str {
        match self {
            Mode::Professional => "professional",
            Mode::Balanced => "balanced",
            Mode::Hype => "hype",
            Mode::Roast => "roast",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Professional => "Professional",
            Mode::Balanced => "Balanced",
            Mode::Hype => "Hype Mode",
            Mode::Roast => "Roast Mode",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Mode::Professional => "👔",
            Mode::Balanced => "✨",
            Mode::Hype => "🔥",
            Mode::Roast => "😈",
        }
    }

    /// Persona instruction placed at the top of the prompt
    pub fn persona(self) -> &'static str {
        match self {
            Mode::Professional => {
                "You are a professional fashion consultant. Be constructive, polite, and focus on workplace appropriateness."
            }
            Mode::Balanced => {
                "You are a friendly fashion advisor. Be honest but encouraging, offering helpful suggestions."
            }
            Mode::Hype => {
                "You are the user's biggest fan! Be enthusiastic and supportive. Find the positives in everything!"
            }
            Mode::Roast => {
                "You are a witty fashion critic. Be funny and honest with playful roasting, but never cruel. Keep it lighthearted!"
            }
        }
    }

    /// Whether the answer should end with a roast section
    pub fn wants_roast(self) -> bool {
        self == Mode::Roast
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMode(s.trim().to_string()))
    }
}
