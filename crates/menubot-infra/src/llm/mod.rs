//! Generation provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `menubot-core`, plus a factory ([`create_provider`])
//! that builds the configured provider at startup.
//!
//! [`LlmProvider`]: menubot_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;
use tracing::info;

use menubot_core::llm::box_provider::BoxLlmProvider;
use menubot_types::config::LlmConfig;
use menubot_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{self as oai_config, OpenAiCompatConfig};

/// Create a [`BoxLlmProvider`] from the `[llm]` config section.
///
/// `base_url` wins when set; otherwise the provider name selects a
/// well-known endpoint. Unknown names without a `base_url` are rejected.
///
/// # Errors
///
/// `AuthenticationFailed` when no API key is available, `InvalidRequest`
/// for an unknown provider without a `base_url`.
pub fn create_provider(
    config: &LlmConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;

    let oai = match config.base_url.as_deref() {
        Some(base_url) => OpenAiCompatConfig {
            provider_name: config.provider.clone(),
            base_url: base_url.to_string(),
            api_key: key,
            model: config.model.clone(),
        },
        None => match config.provider.as_str() {
            "openai" => oai_config::openai_defaults(key, &config.model),
            "gemini" => oai_config::gemini_defaults(key, &config.model),
            "mistral" => oai_config::mistral_defaults(key, &config.model),
            other => {
                return Err(LlmError::InvalidRequest(format!(
                    "unknown provider '{other}' requires llm.base_url"
                )));
            }
        },
    };

    info!(
        provider = %oai.provider_name,
        base_url = %oai.base_url,
        model = %oai.model,
        "Generation provider configured"
    );
    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Option<SecretString> {
        Some(SecretString::from("sk-test".to_string()))
    }

    #[test]
    fn test_create_provider_without_key_fails() {
        let result = create_provider(&LlmConfig::default(), None);
        assert!(matches!(result, Err(LlmError::AuthenticationFailed)));
    }

    #[test]
    fn test_create_known_provider() {
        let config = LlmConfig {
            provider: "gemini".to_string(),
            ..Default::default()
        };
        let provider = create_provider(&config, key()).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn test_create_custom_endpoint() {
        let config = LlmConfig {
            provider: "local".to_string(),
            base_url: Some("http://localhost:11434/v1".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config, key()).unwrap();
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn test_unknown_provider_without_base_url_fails() {
        let config = LlmConfig {
            provider: "mystery".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_provider(&config, key()),
            Err(LlmError::InvalidRequest(_))
        ));
    }
}
