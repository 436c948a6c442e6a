//! Application state shared by every command.
//!
//! The provider is built once here and injected into the content service;
//! nothing else constructs an API client.

use std::path::Path;

use anyhow::Context;

use etutor_core::catalog::LessonCatalog;
use etutor_core::content::{ContentService, ContentSettings};
use etutor_infra::config::load_config;
use etutor_infra::llm::create_provider;
use etutor_infra::secret::resolve_api_key;
use etutor_types::config::TutorConfig;
use etutor_types::llm::ProviderType;

/// Catalog, config, and the content service pinned to one provider.
#[derive(Clone)]
pub struct AppState {
    pub catalog: LessonCatalog,
    pub config: TutorConfig,
    pub content: ContentService,
}

impl AppState {
    /// Load config, resolve the credential, and wire the content service.
    ///
    /// A missing API key is fatal unless `offline` selects the canned provider.
    pub async fn init(config_path: Option<&Path>, offline: bool) -> anyhow::Result<Self> {
        let config = load_config(config_path).await?;

        let (provider_type, api_key) = if offline {
            (ProviderType::Canned, None)
        } else {
            let key = resolve_api_key(&config.api_key_env)
                .context("Set the key in your environment, or pass --offline to use canned content")?;
            (ProviderType::Gemini, Some(key))
        };

        let provider = create_provider(provider_type, &config, api_key)?;
        tracing::info!(provider = provider.name(), model = %config.model, "Content provider ready");

        let content = ContentService::new(provider, ContentSettings::from(&config));
        Ok(Self {
            catalog: LessonCatalog::builtin(),
            config,
            content,
        })
    }
}
