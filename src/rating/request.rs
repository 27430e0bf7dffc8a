//! Wire format of the messages API
//!
//! One user message carrying the photo (base64, tagged with its media type)
//! followed by the prompt text. The verdict is the first text block of the
//! response; an `error` object anywhere in the body is a failure.

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::prompt::build_prompt;
use crate::error::RatingError;
use crate::state::data::UploadedImage;
use crate::state::mode::Mode;

/// Longest slice of an unexpected body echoed back to the user
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
pub struct RequestMessage {
    pub role: &'static str,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Image { source: ImageSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

/// Assemble the request body for one photo and mode
pub fn build_request(image: &UploadedImage, mode: Mode, model: &str, max_tokens: u32) -> MessagesRequest {
    let data = base64::engine::general_purpose::STANDARD.encode(image.bytes.as_slice());

    MessagesRequest {
        model: model.to_string(),
        max_tokens,
        messages: vec![RequestMessage {
            role: "user",
            content: vec![
                ContentBlock::Image {
                    source: ImageSource {
                        kind: "base64",
                        media_type: image.media_type.to_string(),
                        data,
                    },
                },
                ContentBlock::Text {
                    text: build_prompt(mode),
                },
            ],
        }],
    }
}

/// Turn an HTTP status and body into a verdict or an error
pub fn parse_response(status: u16, body: &str) -> Result<String, RatingError> {
    let success = (200..300).contains(&status);

    let response: MessagesResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !success => {
            return Err(RatingError::Status {
                status,
                body: excerpt(body),
            })
        }
        Err(e) => return Err(RatingError::Malformed(e.to_string())),
    };

    if let Some(error) = response.error {
        let message = error
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "API request failed".to_string());
        return Err(RatingError::Upstream(message));
    }

    if !success {
        return Err(RatingError::Status {
            status,
            body: excerpt(body),
        });
    }

    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| RatingError::Malformed("response contained no text".to_string()))
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn photo() -> UploadedImage {
        UploadedImage {
            path: PathBuf::from("fit.png"),
            bytes: Arc::new(b"hello".to_vec()),
            media_type: "image/png",
        }
    }

    fn payload(mode: Mode) -> Value {
        serde_json::to_value(build_request(&photo(), mode, "claude-test", 1500)).unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let body = payload(Mode::Balanced);

        assert_eq!(body["model"], "claude-test");
        assert_eq!(body["max_tokens"], 1500);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");

        let image = &body["messages"][0]["content"][0];
        assert_eq!(
            *image,
            json!({
                "type": "image",
                "source": { "type": "base64", "media_type": "image/png", "data": "aGVsbG8=" }
            })
        );
        assert_eq!(body["messages"][0]["content"][1]["type"], "text");
    }

    #[test]
    fn test_payload_embeds_mode_persona_and_roast_iff_roast() {
        for mode in Mode::ALL {
            let body = payload(mode);
            let text = body["messages"][0]["content"][1]["text"].as_str().unwrap();

            assert!(text.contains(mode.persona()));
            for other in Mode::ALL.into_iter().filter(|m| *m != mode) {
                assert!(!text.contains(other.persona()));
            }
            assert_eq!(text.contains("**The Roast:**"), mode == Mode::Roast);
        }
    }

    #[test]
    fn test_parse_success_takes_first_text_block() {
        let body = json!({
            "content": [
                { "type": "text", "text": "**Overall Rating: 7/10**\nNice jacket" },
                { "type": "text", "text": "ignored" }
            ]
        })
        .to_string();

        assert_eq!(
            parse_response(200, &body).unwrap(),
            "**Overall Rating: 7/10**\nNice jacket"
        );
    }

    #[test]
    fn test_parse_skips_non_text_blocks() {
        let body = r#"{"content":[{"type":"thinking"},{"type":"text","text":"ok"}]}"#;
        assert_eq!(parse_response(200, body).unwrap(), "ok");
    }

    #[test]
    fn test_parse_error_object() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"rate limited"}}"#;
        assert_eq!(
            parse_response(429, body).unwrap_err(),
            RatingError::Upstream("rate limited".to_string())
        );
        // An error object wins even with a 200
        let body = r#"{"error":{"message":"rate limited"}}"#;
        assert_eq!(
            parse_response(200, body).unwrap_err(),
            RatingError::Upstream("rate limited".to_string())
        );
    }

    #[test]
    fn test_parse_error_without_message() {
        let body = r#"{"error":{}}"#;
        assert_eq!(
            parse_response(500, body).unwrap_err(),
            RatingError::Upstream("API request failed".to_string())
        );
    }

    #[test]
    fn test_parse_non_json_failure_status() {
        let err = parse_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(
            err,
            RatingError::Status {
                status: 502,
                body: "<html>Bad Gateway</html>".to_string()
            }
        );
    }

    #[test]
    fn test_parse_malformed_success() {
        assert!(matches!(parse_response(200, "not json"), Err(RatingError::Malformed(_))));
        assert!(matches!(
            parse_response(200, r#"{"content":[]}"#),
            Err(RatingError::Malformed(_))
        ));
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), BODY_EXCERPT_CHARS + 1);
        assert!(cut.ends_with('…'));
    }
}
