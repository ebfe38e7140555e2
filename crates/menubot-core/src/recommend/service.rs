//! Recommendation service: the single orchestration entry point for a chat
//! request.
//!
//! Per request: validate -> fetch menu (best effort) -> assemble prompt ->
//! generate -> commit both turns -> respond. Any stage may short-circuit
//! with an error; only a successful generation commits to the session, so a
//! failed or cancelled request leaves no trace in the history.

use std::sync::Arc;

use tracing::{Instrument, debug, error, info_span, warn};

use menubot_types::chat::{SessionKey, Turn};
use menubot_types::error::RecommendError;

use crate::chat::prompt::{PromptAssembler, PromptRequest};
use crate::chat::session_store::SessionStore;
use crate::llm::client::{GenerationClient, GenerationError};
use crate::repository::menu::MenuSnapshotSource;

/// Message returned when the request carries no usable text.
pub const NO_MESSAGE: &str = "No message provided.";

/// Orchestrates session history, menu context and the generation client.
///
/// The session store is shared (`Arc`) so a background sweeper can apply
/// retention without going through the service.
pub struct RecommendationService<S: SessionStore, M: MenuSnapshotSource> {
    sessions: Arc<S>,
    menu: M,
    generator: GenerationClient,
    assembler: PromptAssembler,
}

impl<S: SessionStore, M: MenuSnapshotSource> RecommendationService<S, M> {
    pub fn new(sessions: Arc<S>, menu: M, generator: GenerationClient) -> Self {
        Self {
            sessions,
            menu,
            generator,
            assembler: PromptAssembler::default(),
        }
    }

    /// Replace the default prompt layout.
    pub fn with_assembler(mut self, assembler: PromptAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn sessions(&self) -> &Arc<S> {
        &self.sessions
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_configured()
    }

    /// Handle one chat message for `key` and return the assistant's reply.
    pub async fn recommend(
        &self,
        key: &SessionKey,
        message: Option<&str>,
    ) -> Result<String, RecommendError> {
        // Blank input is rejected, but accepted text is kept verbatim.
        let message = message
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| RecommendError::Validation(NO_MESSAGE.to_string()))?;

        if !self.generator.is_configured() {
            return Err(RecommendError::ServiceUnavailable);
        }

        let span = info_span!("recommend", session = %key);
        self.run(key, message).instrument(span).await
    }

    async fn run(&self, key: &SessionKey, message: &str) -> Result<String, RecommendError> {
        let menu = match self.menu.list_menu_items().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Menu unavailable, recommending without menu context");
                Vec::new()
            }
        };

        let history = self.sessions.get_history(key);
        let request = PromptRequest::assemble(&history, message, &menu);
        let prompt = self.assembler.render(&request);
        debug!(
            history_turns = history.len(),
            menu_items = menu.len(),
            prompt_chars = prompt.len(),
            "Prompt assembled"
        );

        let reply = self.generator.generate(&prompt).await.map_err(|e| match e {
            GenerationError::ProviderUnconfigured => RecommendError::ServiceUnavailable,
            GenerationError::ProviderUnavailable(detail) => {
                error!(error = %detail, "Recommendation generation failed");
                RecommendError::Upstream(detail)
            }
            GenerationError::Internal(detail) => {
                error!(error = %detail, "Recommendation generation failed unexpectedly");
                RecommendError::Internal(detail)
            }
        })?;

        self.sessions
            .append_pair(key, Turn::user(message), Turn::assistant(reply.clone()));
        Ok(reply)
    }
}
