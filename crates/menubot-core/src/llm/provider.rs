//! LlmProvider trait definition.
//!
//! This is the core abstraction that text-generation backends implement.
//! Uses RPITIT for `complete`; see [`super::box_provider`] for the
//! object-safe wrapper.

use menubot_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for text-generation backends.
///
/// Implementations live in menubot-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
