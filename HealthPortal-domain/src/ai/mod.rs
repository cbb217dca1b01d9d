//! AI completion client and the staged analysis pipeline.
//!
//! [`CompletionClient`] is the seam to the model provider. [`ClaudeClient`]
//! talks to the Anthropic Messages API; tests substitute a mock. The
//! [`AnalysisPipeline`] turns cycle input into role-specific prompts and
//! chains the stage outputs as context for later stages.

mod claude;
mod client;
pub mod lab_parser;
mod pipeline;
pub mod prompts;

pub use claude::{ClaudeClient, ClaudeConfig, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
pub use client::{AiError, Completion, CompletionClient};
pub use pipeline::{build_prompt, AnalysisPipeline, AnalysisRole, FULL_CYCLE_ROLES};

#[cfg(test)]
pub use client::MockCompletionClient;
