// Testing utilities for crates that depend on the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ai::{AiError, AnalysisPipeline, Completion, CompletionClient};

/// Completion client that answers from a script instead of the network.
///
/// Queued replies are served first, in order; after that every call gets the
/// fallback reply. Prompts are recorded for assertions.
#[derive(Debug, Default)]
pub struct ScriptedCompletionClient {
    queued: Mutex<VecDeque<Result<String, String>>>,
    fallback: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletionClient {
    /// Create a client that answers every prompt with `reply`
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            fallback: reply.into(),
            ..Default::default()
        }
    }

    /// Queue a successful reply
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.push(Ok(reply.into()));
        self
    }

    /// Queue a provider failure
    pub fn with_failure(self, body: impl Into<String>) -> Self {
        self.push(Err(body.into()));
        self
    }

    fn push(&self, entry: Result<String, String>) {
        if let Ok(mut queued) = self.queued.lock() {
            queued.push_back(entry);
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Wrap the client in a pipeline, keeping a handle for assertions
    pub fn into_pipeline(self) -> (AnalysisPipeline, Arc<Self>) {
        let client = Arc::new(self);
        let pipeline = AnalysisPipeline::new(client.clone(), 1024);
        (pipeline, client)
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<Completion, AiError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let next = self
            .queued
            .lock()
            .ok()
            .and_then(|mut queued| queued.pop_front())
            .unwrap_or_else(|| Ok(self.fallback.clone()));

        match next {
            Ok(text) => Ok(Completion {
                tokens: (prompt.len() / 4 + text.len() / 4) as u32,
                text,
                model: "scripted".to_string(),
            }),
            Err(body) => Err(AiError::Api { status: 500, body }),
        }
    }
}
