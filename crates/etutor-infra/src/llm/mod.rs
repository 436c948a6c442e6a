//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](etutor_core::llm::provider::LlmProvider)
//! implementations: [`GeminiProvider`] for the live API and
//! [`CannedProvider`] for offline use.
//!
//! [`create_provider`] builds the right one from a [`ProviderType`] and the
//! loaded [`TutorConfig`].

pub mod canned;
pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use etutor_core::llm::box_provider::BoxLlmProvider;
use etutor_types::config::TutorConfig;
use etutor_types::llm::{LlmError, ProviderType};

pub use self::canned::CannedProvider;
pub use self::gemini::GeminiProvider;

/// Create a [`BoxLlmProvider`] for the given provider type.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if a Gemini provider is requested without
/// an API key, or `Provider` if the HTTP client cannot be built.
pub fn create_provider(
    provider_type: ProviderType,
    config: &TutorConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    match provider_type {
        ProviderType::Gemini => {
            let key = api_key.ok_or(LlmError::AuthenticationFailed)?;
            let provider = GeminiProvider::new(
                key,
                config.model.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )?
            .with_base_url(config.base_url.clone());
            tracing::debug!(model = %config.model, base_url = %config.base_url, "Gemini provider ready");
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderType::Canned => Ok(BoxLlmProvider::new(CannedProvider::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_gemini() {
        let provider = create_provider(
            ProviderType::Gemini,
            &TutorConfig::default(),
            Some(SecretString::from("gemini-key")),
        )
        .unwrap();
        assert_eq!(provider.name(), "gemini");
        assert!(provider.capabilities().streaming);
    }

    #[test]
    fn test_create_provider_gemini_missing_key() {
        match create_provider(ProviderType::Gemini, &TutorConfig::default(), None) {
            Err(LlmError::AuthenticationFailed) => {}
            Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }

    #[test]
    fn test_create_provider_canned_needs_no_key() {
        let provider = create_provider(ProviderType::Canned, &TutorConfig::default(), None).unwrap();
        assert_eq!(provider.name(), "canned");
    }
}
