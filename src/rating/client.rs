//! HTTP client for the rating API

use async_trait::async_trait;
use tracing::{debug, info};

use super::request::{build_request, parse_response};
use crate::config::{Config, API_VERSION};
use crate::error::RatingError;
use crate::state::data::UploadedImage;
use crate::state::mode::Mode;

/// Something that can turn a photo and a mode into a verdict
#[async_trait]
pub trait RatingClient: Send + Sync {
    /// Issue exactly one request; no retries
    async fn rate(&self, image: &UploadedImage, mode: Mode) -> Result<String, RatingError>;
}

/// Client for the Anthropic messages endpoint
pub struct AnthropicClient {
    http: reqwest::Client,
    config: Config,
}

impl AnthropicClient {
    pub fn new(config: Config) -> Result<Self, RatingError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("outfit-rater/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RatingError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl RatingClient for AnthropicClient {
    async fn rate(&self, image: &UploadedImage, mode: Mode) -> Result<String, RatingError> {
        let api_key = self.config.api_key.as_deref().ok_or(RatingError::MissingApiKey)?;

        let payload = build_request(image, mode, &self.config.model, self.config.max_tokens);
        info!(
            "Requesting rating: mode={}, model={}, image={} bytes",
            mode.id(),
            self.config.model,
            image.size_bytes()
        );

        let response = self
            .http
            .post(&self.config.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!("Rating response: HTTP {} ({} bytes)", status.as_u16(), body.len());

        parse_response(status.as_u16(), &body)
    }
}

impl AnthropicClient {
    fn classify(&self, err: reqwest::Error) -> RatingError {
        if err.is_timeout() {
            RatingError::Timeout(self.config.timeout_secs)
        } else {
            RatingError::from(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app::{AppState, FinishOutcome, Phase};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn photo() -> UploadedImage {
        UploadedImage {
            path: PathBuf::from("fit.jpg"),
            bytes: Arc::new(vec![0xFF, 0xD8, 0xFF]),
            media_type: "image/jpeg",
        }
    }

    /// Serve one canned HTTP response and hand back the raw request text
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/messages", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            // Read headers, then exactly Content-Length bytes of body
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let content_length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= split + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (url, handle)
    }

    fn client_for(url: String, api_key: Option<&str>) -> AnthropicClient {
        AnthropicClient::new(Config {
            api_key: api_key.map(str::to_string),
            api_url: url,
            model: "claude-test".to_string(),
            ..Config::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_successful_rating_sends_headers_and_payload() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"content":[{"type":"text","text":"**Overall Rating: 7/10**\nLooks sharp"}]}"#,
        )
        .await;
        let client = client_for(url, Some("sk-test-key"));

        let verdict = client.rate(&photo(), Mode::Roast).await.unwrap();
        assert_eq!(verdict, "**Overall Rating: 7/10**\nLooks sharp");

        let request = server.await.unwrap();
        let lowered = request.to_lowercase();
        assert!(request.starts_with("POST /v1/messages"));
        assert!(lowered.contains("x-api-key: sk-test-key"));
        assert!(lowered.contains("anthropic-version: 2023-06-01"));
        assert!(lowered.contains("content-type: application/json"));
        assert!(request.contains(r#""model":"claude-test""#));
        assert!(request.contains(r#""media_type":"image/jpeg""#));
        assert!(request.contains(Mode::Roast.persona()));
    }

    #[tokio::test]
    async fn test_upstream_error_is_surfaced() {
        let (url, server) = serve_once(
            "HTTP/1.1 429 Too Many Requests",
            r#"{"type":"error","error":{"type":"rate_limit_error","message":"rate limited"}}"#,
        )
        .await;
        let client = client_for(url, Some("sk-test-key"));

        let err = client.rate(&photo(), Mode::Balanced).await.unwrap_err();
        assert_eq!(err, RatingError::Upstream("rate limited".to_string()));
        assert!(err.to_string().contains("rate limited"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_request() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/messages", listener.local_addr().unwrap());
        let client = client_for(url, None);

        let err = client.rate(&photo(), Mode::Balanced).await.unwrap_err();
        assert_eq!(err, RatingError::MissingApiKey);

        let pending = tokio::time::timeout(std::time::Duration::from_millis(50), listener.accept()).await;
        assert!(pending.is_err(), "no connection should have been made");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/messages", listener.local_addr().unwrap());
        drop(listener);

        let client = client_for(url, Some("sk-test-key"));
        let err = client.rate(&photo(), Mode::Hype).await.unwrap_err();
        assert!(matches!(err, RatingError::Transport(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_silent_server_times_out_and_clears_busy() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/messages", listener.local_addr().unwrap());

        // Accept the connection, then never answer
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            drop(socket);
        });

        let client: Arc<dyn RatingClient> = Arc::new(
            AnthropicClient::new(Config {
                api_key: Some("sk-test-key".to_string()),
                api_url: url,
                timeout_secs: 1,
                ..Config::default()
            })
            .unwrap(),
        );

        let mut state = AppState::new(Mode::Balanced);
        state.select_image(photo());
        let pending = crate::rating::submit(&mut state, client).unwrap();
        assert!(state.is_busy());

        let finished = pending.await;
        assert_eq!(finished.outcome, Err(RatingError::Timeout(1)));
        assert_eq!(state.finish_rating(finished), FinishOutcome::Errored);

        assert!(!state.is_busy());
        assert_eq!(state.phase(), Phase::Errored);
        assert_eq!(
            state.notice(),
            Some("Failed to get rating: request timed out after 1s")
        );
        assert!(state.can_rate());

        server.abort();
    }
}
