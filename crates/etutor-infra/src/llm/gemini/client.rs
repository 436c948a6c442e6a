//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends requests to the Generative Language API
//! (`/v1beta/models/{model}:generateContent`) authenticated with the
//! `x-goog-api-key` header. Supports both non-streaming (`complete`) and
//! SSE streaming (`stream`) modes.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use etutor_core::llm::provider::{EventStream, LlmProvider};
use etutor_observe::genai_attrs::PROVIDER_GEMINI;
use etutor_types::config::DEFAULT_BASE_URL;
use etutor_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, ProviderCapabilities,
    StopReason,
};

use super::streaming::create_gemini_stream;
use super::types::{GeminiContent, GeminiErrorBody, GeminiRequest, GeminiResponse, GenerationConfig, ThinkingConfig};

/// Header carrying the API key.
pub(super) const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini provider.
///
/// The API key is only exposed when building request headers.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    capabilities: ProviderCapabilities,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Default model (e.g., "gemini-2.5-flash"), used when a request leaves it empty
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let capabilities = Self::capabilities_for_model(&model);

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            capabilities,
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn capabilities_for_model(model: &str) -> ProviderCapabilities {
        if model.contains("2.5") || model.contains("gemini-3") {
            ProviderCapabilities {
                streaming: true,
                structured_output: true,
                thinking: true,
                max_context_tokens: 1_048_576,
                max_output_tokens: 65_536,
            }
        } else {
            // Older or unknown models: no thinking budget control
            ProviderCapabilities {
                streaming: true,
                structured_output: true,
                thinking: false,
                max_context_tokens: 1_048_576,
                max_output_tokens: 8_192,
            }
        }
    }

    /// Full URL for a model method, e.g. `generateContent`.
    fn url(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, model, method)
    }

    fn model_for<'a>(&'a self, request: &'a CompletionRequest) -> &'a str {
        if request.model.is_empty() {
            &self.model
        } else {
            &request.model
        }
    }

    /// Convert a generic [`CompletionRequest`] into a [`GeminiRequest`].
    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let mut system = request.system.clone();
        let mut contents = Vec::with_capacity(request.messages.len());
        for message in &request.messages {
            match message.role {
                MessageRole::User => {
                    contents.push(GeminiContent::text(Some("user"), message.content.clone()))
                }
                MessageRole::Assistant => {
                    contents.push(GeminiContent::text(Some("model"), message.content.clone()))
                }
                // Gemini has no system turn; fold it into the instruction.
                MessageRole::System => {
                    let merged = match system.take() {
                        Some(s) => format!("{s}\n\n{}", message.content),
                        None => message.content.clone(),
                    };
                    system = Some(merged);
                }
            }
        }

        let (response_mime_type, response_json_schema) = match &request.output_config {
            Some(config) => (Some("application/json".to_string()), Some(config.schema.clone())),
            None => (None, None),
        };

        let thinking_config = match request.thinking_budget {
            Some(budget) if self.capabilities.thinking => Some(ThinkingConfig {
                thinking_budget: budget,
            }),
            _ => None,
        };

        GeminiRequest {
            contents,
            system_instruction: system.map(|s| GeminiContent::text(None, s)),
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: Some(request.max_tokens),
                stop_sequences: request.stop_sequences.clone(),
                response_mime_type,
                response_json_schema,
                thinking_config,
            }),
        }
    }
}

/// Map a non-2xx response to an [`LlmError`].
pub(super) fn error_from_status(status: reqwest::StatusCode, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<GeminiErrorBody>(body).ok();
    let message = parsed
        .as_ref()
        .map(|b| b.error.message.clone())
        .unwrap_or_else(|| body.to_string());
    let api_status = parsed.as_ref().map(|b| b.error.status.as_str()).unwrap_or("");

    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        400 if message.contains("API key") => LlmError::AuthenticationFailed,
        400 => LlmError::InvalidRequest(message),
        429 => LlmError::RateLimited {
            retry_after_ms: None,
        },
        503 => LlmError::Overloaded(message),
        504 => LlmError::Timeout,
        _ if api_status == "RESOURCE_EXHAUSTED" => LlmError::RateLimited {
            retry_after_ms: None,
        },
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {message}"),
        },
    }
}

/// Map a transport-level reqwest error to an [`LlmError`].
pub(super) fn error_from_reqwest(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Provider {
            message: format!("HTTP request failed: {e}"),
        }
    }
}

// GeminiProvider intentionally does NOT derive Debug; the API key never
// appears in formatted output.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_GEMINI
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = self.model_for(request).to_string();
        let body = self.to_gemini_request(request);
        let url = self.url(&model, "generateContent");
        debug!(%model, messages = request.messages.len(), "Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(error_from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini API error response");
            return Err(error_from_status(status, &error_body));
        }

        let gemini_resp: GeminiResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;
        gemini_resp.check_blocked()?;

        Ok(CompletionResponse {
            id: gemini_resp.response_id.clone().unwrap_or_default(),
            content: gemini_resp.text(),
            model: gemini_resp.model_version.clone().unwrap_or(model),
            stop_reason: gemini_resp.stop_reason().unwrap_or(StopReason::EndTurn),
            usage: gemini_resp.usage().unwrap_or_default(),
        })
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        let model = self.model_for(&request).to_string();
        let body = self.to_gemini_request(&request);
        let url = format!("{}?alt=sse", self.url(&model, "streamGenerateContent"));

        create_gemini_stream(&self.client, &url, body, &self.api_key)
    }
}
