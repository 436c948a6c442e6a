//! LlmProvider trait definition.
//!
//! The abstraction every generative backend implements. Uses RPITIT for
//! `complete` and `Pin<Box<dyn Stream>>` for `stream` so the trait stays
//! usable behind `BoxLlmProvider`.

use std::pin::Pin;

use futures_util::Stream;

use etutor_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StreamEvent,
};

/// Boxed stream of provider events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for generative-content backends (Gemini, canned offline responses).
///
/// Implementations live in etutor-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// What this provider supports (streaming, structured output, thinking).
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// Providers without streaming support may return a stream that yields
    /// a single error; callers check `capabilities().streaming` first.
    fn stream(&self, request: CompletionRequest) -> EventStream;
}
