//! Generation client: prompt text in, generated text or a typed failure out.
//!
//! Every call runs under a timeout. Provider errors, timeouts and blank
//! output all collapse into [`GenerationError::ProviderUnavailable`]; a
//! panicking provider becomes [`GenerationError::Internal`]. The client
//! never retries.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;
use tracing::{Instrument, debug, error, info_span, warn};

use menubot_types::config::LlmConfig;
use menubot_types::llm::CompletionRequest;

use super::box_provider::BoxLlmProvider;

/// Failures of a single generation call.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No provider was available at startup. Permanent for the process.
    #[error("generation provider is not configured")]
    ProviderUnconfigured,

    /// The call failed, timed out, or returned unusable output.
    #[error("generation provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider panicked while producing a reply.
    #[error("generation provider panicked: {0}")]
    Internal(String),
}

/// Fixed sampling configuration applied to every call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Wraps the configured provider (if any) with the request settings.
#[derive(Debug)]
pub struct GenerationClient {
    provider: Option<BoxLlmProvider>,
    settings: GenerationSettings,
}

impl GenerationClient {
    pub fn new(provider: Option<BoxLlmProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Client with no provider; every call fails with `ProviderUnconfigured`.
    pub fn unconfigured(settings: GenerationSettings) -> Self {
        Self::new(None, settings)
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Send `prompt` as a single user message and return the trimmed reply.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(GenerationError::ProviderUnconfigured)?;

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt: prompt.to_string(),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let outcome = tokio::time::timeout(
            self.settings.timeout,
            // The provider is invoked inside the future so a panic before its
            // first await is caught too.
            AssertUnwindSafe(async { provider.complete(&request).await }.instrument(span))
                .catch_unwind(),
        )
        .await;

        let response = match outcome {
            Err(_elapsed) => {
                warn!(
                    provider = provider.name(),
                    timeout_ms = self.settings.timeout.as_millis() as u64,
                    "Generation call timed out"
                );
                return Err(GenerationError::ProviderUnavailable(format!(
                    "timed out after {:?}",
                    self.settings.timeout
                )));
            }
            Ok(Err(payload)) => {
                let detail = panic_message(payload.as_ref());
                error!(provider = provider.name(), panic = %detail, "Generation provider panicked");
                return Err(GenerationError::Internal(detail));
            }
            Ok(Ok(Err(e))) => {
                warn!(provider = provider.name(), error = %e, "Generation call failed");
                return Err(GenerationError::ProviderUnavailable(e.to_string()));
            }
            Ok(Ok(Ok(response))) => response,
        };

        let text = response.content.trim();
        if text.is_empty() {
            warn!(provider = provider.name(), "Generation returned empty output");
            return Err(GenerationError::ProviderUnavailable(
                "empty completion".to_string(),
            ));
        }

        debug!(
            provider = provider.name(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "Generation complete"
        );

        Ok(text.to_string())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
