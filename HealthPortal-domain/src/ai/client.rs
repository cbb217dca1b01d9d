use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while talking to the model provider
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key was configured
    #[error("AI analysis is not configured; set CLAUDE_API_KEY")]
    NotConfigured,

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status other than rate limiting
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Still rate limited after the final attempt
    #[error("Rate limited after {0} attempts")]
    RateLimited(u32),

    /// The provider answered with something we could not use
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A pipeline stage failed; the stage name leads the message
    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: &'static str,
        #[source]
        source: Box<AiError>,
    },
}

/// A finished completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub model: String,
    /// Input plus output tokens
    pub tokens: u32,
}

/// A text-in, text-out language model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a single user message and collect the reply text
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion, AiError>;
}
