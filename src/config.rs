//! Application configuration loaded from environment variables.
//!
//! An optional `.env` file is read first, then the process environment.
//!
//! - `ANTHROPIC_API_KEY`: API credential (optional at start-up; rating fails without it)
//! - `OUTFIT_RATER_API_URL`: messages endpoint (default: Anthropic's public endpoint)
//! - `OUTFIT_RATER_MODEL`: model identifier (default: `claude-sonnet-4-20250514`)
//! - `OUTFIT_RATER_MAX_TOKENS`: output token bound (default: 1500)
//! - `OUTFIT_RATER_TIMEOUT_SECS`: request timeout in seconds (default: 60)
//! - `OUTFIT_RATER_MODE`: initial feedback tone (default: `balanced`)

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;
use crate::state::mode::Mode;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Fixed protocol version sent with every request
pub const API_VERSION: &str = "2023-06-01";

/// Runtime configuration for the rating client
#[derive(Clone)]
pub struct Config {
    /// Credential for the `x-api-key` header
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Mode selected when the window opens
    pub initial_mode: Mode,
}

impl Config {
    /// Load configuration from `.env` and the environment.
    ///
    /// Fails only when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            api_url: env_or("OUTFIT_RATER_API_URL", DEFAULT_API_URL.to_string())?,
            model: env_or("OUTFIT_RATER_MODEL", DEFAULT_MODEL.to_string())?,
            max_tokens: env_or("OUTFIT_RATER_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            timeout_secs: env_or("OUTFIT_RATER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            initial_mode: env_or("OUTFIT_RATER_MODE", Mode::default())?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            initial_mode: Mode::default(),
        }
    }
}

// Never print the credential
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("initial_mode", &self.initial_mode)
            .finish()
    }
}

/// Load an environment variable with a default value.
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}
