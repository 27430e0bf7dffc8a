//! Error types for configuration, image intake and rating requests
//!
//! Every variant carries owned strings so errors can be cloned into
//! iced messages. The `Display` text is what the user sees.

use thiserror::Error;

/// Failures while reading configuration at start-up
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be parsed
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },

    /// Not one of the known feedback tones
    #[error("unknown mode: {0}")]
    UnknownMode(String),
}

/// Failures while loading a selected photo or deriving its preview
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// The file could not be read from disk
    #[error("Could not read {path}: {reason}")]
    Read { path: String, reason: String },

    /// The bytes could not be decoded into a preview image
    #[error("Could not preview this photo: {0}")]
    Decode(String),

    /// The background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Join(String),
}

/// Failures of a single rating attempt
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    /// Rating was requested with no photo selected
    #[error("Please upload a photo first!")]
    MissingImage,

    /// A request is already outstanding
    #[error("A rating is already in progress")]
    Busy,

    /// No API credential was configured
    #[error("No API key configured. Set ANTHROPIC_API_KEY and restart.")]
    MissingApiKey,

    /// The request did not complete within the configured timeout
    #[error("Failed to get rating: request timed out after {0}s")]
    Timeout(u64),

    /// Network unreachable, TLS failure, connection reset, ...
    #[error("Failed to get rating: {0}")]
    Transport(String),

    /// Non-success HTTP status without a structured error body
    #[error("Failed to get rating: HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Failed to get rating: malformed response: {0}")]
    Malformed(String),

    /// The service reported a structured error; shown verbatim
    #[error("Failed to get rating: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for RatingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RatingError::Malformed(err.to_string())
        } else {
            RatingError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_is_verbatim() {
        let err = RatingError::Upstream("rate limited".to_string());
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_config_error_names_the_key() {
        let err = ConfigError::Invalid {
            key: "OUTFIT_RATER_MAX_TOKENS".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for OUTFIT_RATER_MAX_TOKENS: invalid digit found in string"
        );
    }

    #[test]
    fn test_missing_image_message() {
        assert_eq!(RatingError::MissingImage.to_string(), "Please upload a photo first!");
    }
}
