use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::client::{AiError, Completion, CompletionClient};

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_ATTEMPTS: u32 = 3;

/// Connection settings for the Anthropic Messages API
#[derive(Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub timeout: Duration,
    /// First rate-limit wait; doubles on each retry
    pub retry_base_delay: Duration,
}

impl ClaudeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(300),
            retry_base_delay: Duration::from_secs(1),
        }
    }
}

impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("retry_base_delay", &self.retry_base_delay)
            .finish()
    }
}

/// [`CompletionClient`] backed by the Anthropic Messages API
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    client: Client,
    config: ClaudeConfig,
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

impl MessageResponse {
    fn into_completion(self, fallback_model: &str) -> Completion {
        let text = self
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        Completion {
            text,
            model: self.model.unwrap_or_else(|| fallback_model.to_string()),
            tokens: self.usage.input_tokens + self.usage.output_tokens,
        }
    }
}

impl ClaudeClient {
    pub fn new(config: ClaudeConfig) -> Result<Self, AiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl CompletionClient for ClaudeClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion, AiError> {
        let request = MessageRequest {
            model: &self.config.model,
            max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut attempt = 0;
        loop {
            debug!(
                "Sending completion request to {} (model={}, prompt_chars={})",
                self.config.api_url,
                self.config.model,
                prompt.len()
            );

            let response = self
                .client
                .post(&self.config.api_url)
                .header("x-api-key", &self.config.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&request)
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let body = response.json::<MessageResponse>().await?;
                    return Ok(body.into_completion(&self.config.model));
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    attempt += 1;
                    if attempt >= MAX_ATTEMPTS {
                        return Err(AiError::RateLimited(MAX_ATTEMPTS));
                    }
                    let wait_time = self.config.retry_base_delay * 2u32.pow(attempt);
                    warn!("Rate limited, retrying in {:?}", wait_time);
                    sleep(wait_time).await;
                }
                status => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(AiError::Api {
                        status: status.as_u16(),
                        body,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const OK_BODY: &str = r#"{"content":[{"type":"text","text":"pong"}],"model":"claude-test","usage":{"input_tokens":2,"output_tokens":1}}"#;

    /// Read one HTTP request, headers and `Content-Length` body
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }

    /// Serve one scripted `(status, body)` per connection; the handle yields
    /// the number of requests answered
    async fn serve_script(script: Vec<(u16, &'static str)>) -> (String, JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/messages", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut served = 0;
            for (status, body) in script {
                let (mut socket, _) = listener.accept().await.unwrap();
                read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
                served += 1;
            }
            served
        });

        (url, handle)
    }

    fn client_for(url: String) -> ClaudeClient {
        ClaudeClient::new(ClaudeConfig {
            api_url: url,
            retry_base_delay: Duration::from_millis(1),
            ..ClaudeConfig::new("sk-test")
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_retries_after_rate_limit() {
        let (url, server) = serve_script(vec![(429, "{}"), (200, OK_BODY)]).await;

        let completion = client_for(url).complete("ping", 16).await.unwrap();
        assert_eq!(completion.text, "pong");
        assert_eq!(completion.model, "claude-test");
        assert_eq!(completion.tokens, 3);
        assert_eq!(server.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_three_rate_limits() {
        let (url, server) = serve_script(vec![(429, "{}"), (429, "{}"), (429, "{}")]).await;

        let err = client_for(url).complete("ping", 16).await.unwrap_err();
        assert!(matches!(err, AiError::RateLimited(3)), "unexpected error: {:?}", err);
        assert_eq!(server.await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_server_error_carries_the_body() {
        let (url, server) = serve_script(vec![(500, r#"{"error":"overloaded"}"#)]).await;

        let err = client_for(url).complete("ping", 16).await.unwrap_err();
        match err {
            AiError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, r#"{"error":"overloaded"}"#);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(server.await.unwrap(), 1);
    }

    #[test]
    fn test_response_concatenates_text_blocks() {
        let body: MessageResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "text", "text": "Hello, "},
                    {"type": "tool_use", "id": "x", "name": "noop", "input": {}},
                    {"type": "text", "text": "world"}
                ],
                "model": "claude-sonnet-4-20250514",
                "usage": {"input_tokens": 12, "output_tokens": 30}
            }"#,
        )
        .unwrap();

        let completion = body.into_completion("fallback");
        assert_eq!(completion.text, "Hello, world");
        assert_eq!(completion.model, "claude-sonnet-4-20250514");
        assert_eq!(completion.tokens, 42);
    }

    #[test]
    fn test_request_shape() {
        let request = MessageRequest {
            model: DEFAULT_MODEL,
            max_tokens: 1024,
            messages: [Message {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_config_debug_hides_key() {
        let config = ClaudeConfig::new("sk-secret");
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }
}
