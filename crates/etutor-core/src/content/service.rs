//! Content service: summary, quiz generation, and tutor conversation.
//!
//! Wraps a `BoxLlmProvider` with the prompts and validation the classroom
//! needs. Every upstream call runs inside a GenAI span. Errors come back as
//! `ContentError` for the caller to turn into UI state.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tracing::{Instrument, debug, info_span, warn};

use etutor_observe::genai_attrs::{
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_USAGE_INPUT_TOKENS, GEN_AI_USAGE_OUTPUT_TOKENS,
    OP_CONVERSE, OP_GENERATE_QUIZ, OP_SUMMARIZE,
};
use etutor_types::error::ContentError;
use etutor_types::lesson::Lesson;
use etutor_types::llm::{
    CompletionRequest, LlmError, Message, OutputConfig, StopReason, StreamEvent,
};
use etutor_types::quiz::{Quiz, QuizPayload};

use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::span::StreamInSpan;

use super::prompt;

/// Stream of reply fragments in arrival order.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ContentError>> + Send + 'static>>;

/// Generation settings applied to every request.
#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub quiz_question_count: u32,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            model: etutor_types::config::DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_output_tokens: 2048,
            quiz_question_count: 3,
        }
    }
}

impl From<&etutor_types::config::TutorConfig> for ContentSettings {
    fn from(config: &etutor_types::config::TutorConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            quiz_question_count: config.quiz_question_count,
        }
    }
}

/// Client for the three lesson operations.
///
/// Cheap to clone; clones share the provider.
#[derive(Clone)]
pub struct ContentService {
    provider: Arc<BoxLlmProvider>,
    settings: ContentSettings,
}

impl ContentService {
    pub fn new(provider: BoxLlmProvider, settings: ContentSettings) -> Self {
        Self {
            provider: Arc::new(provider),
            settings,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn settings(&self) -> &ContentSettings {
        &self.settings
    }

    fn request(&self, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            system: None,
            max_tokens: self.settings.max_output_tokens,
            temperature: Some(self.settings.temperature),
            stream: false,
            stop_sequences: None,
            output_config: None,
            thinking_budget: None,
        }
    }

    /// Three key bullet points for `content`.
    pub async fn summarize(&self, content: &str) -> Result<String, ContentError> {
        let mut request = self.request(vec![Message::user(prompt::summary_prompt(content))]);
        request.thinking_budget = Some(0);

        let span = info_span!(
            "gen_ai.summarize",
            gen_ai.operation.name = OP_SUMMARIZE,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            gen_ai.response.finish_reasons = tracing::field::Empty,
        );

        let response = self
            .provider
            .complete(&request)
            .instrument(span.clone())
            .await
            .map_err(|e| {
                warn!(error = %e, "Summary request failed");
                ContentError::from(e)
            })?;

        span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
        span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
        span.record(GEN_AI_RESPONSE_FINISH_REASONS, tracing::field::debug(&response.stop_reason));

        if response.stop_reason == StopReason::Safety {
            return Err(ContentError::RemoteFailure("summary was blocked".into()));
        }
        let summary = response.content.trim();
        if summary.is_empty() {
            return Err(ContentError::RemoteFailure("empty summary".into()));
        }
        Ok(summary.to_string())
    }

    /// A validated multiple-choice quiz titled `Quiz: <lesson_title>`.
    pub async fn generate_quiz(
        &self,
        content: &str,
        lesson_title: &str,
    ) -> Result<Quiz, ContentError> {
        let mut request = self.request(vec![Message::user(prompt::quiz_prompt(
            content,
            self.settings.quiz_question_count,
        ))]);
        request.output_config = Some(OutputConfig {
            name: "quiz".to_string(),
            schema: QuizPayload::response_schema(),
        });

        let span = info_span!(
            "gen_ai.generate_quiz",
            gen_ai.operation.name = OP_GENERATE_QUIZ,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            lesson.title = lesson_title,
        );

        let response = self
            .provider
            .complete(&request)
            .instrument(span.clone())
            .await
            .map_err(|e| {
                warn!(error = %e, "Quiz request failed");
                ContentError::from(e)
            })?;
        span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
        span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);

        let json = prompt::strip_code_fence(&response.content);
        if json.is_empty() {
            return Err(ContentError::RemoteFailure("empty quiz response".into()));
        }
        let payload: QuizPayload = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Quiz payload did not match the schema");
            ContentError::SchemaViolation(e.to_string())
        })?;

        let quiz = payload.into_quiz(Quiz::title_for(lesson_title)).map_err(|e| {
            warn!(error = %e, "Quiz payload broke quiz invariants");
            ContentError::from(e)
        })?;
        debug!(questions = quiz.len(), "Quiz generated");
        Ok(quiz)
    }

    /// Tutor reply to `message` about `lesson`, given the earlier exchanges.
    ///
    /// Streams when the provider supports it, otherwise yields the complete
    /// reply as a single fragment.
    pub fn converse(&self, lesson: &Lesson, history: Vec<Message>, message: &str) -> FragmentStream {
        let mut messages = history;
        messages.push(Message::user(message));
        let mut request = self.request(messages);
        request.system = Some(prompt::tutor_instruction(lesson));

        let span = info_span!(
            "gen_ai.converse",
            gen_ai.operation.name = OP_CONVERSE,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.stream = self.provider.capabilities().streaming,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            lesson.id = %lesson.id,
        );

        if self.provider.capabilities().streaming {
            request.stream = true;
            let events = self.provider.stream(request);
            Box::pin(StreamInSpan::new(fragments(events), span))
        } else {
            let single = single_reply(Arc::clone(&self.provider), request);
            Box::pin(StreamInSpan::new(single, span))
        }
    }
}

/// A complete reply delivered as a one-element stream.
fn single_reply(
    provider: Arc<BoxLlmProvider>,
    request: CompletionRequest,
) -> impl Stream<Item = Result<String, ContentError>> + Send + 'static {
    async_stream::try_stream! {
        let response = provider.complete(&request).await?;
        if response.content.is_empty() {
            Err(ContentError::RemoteFailure("empty reply".into()))?
        }
        yield response.content;
    }
}

/// Reduce provider events to text fragments.
///
/// A stream that ends without any text, or is stopped by a safety filter,
/// is reported as a failure.
fn fragments(
    events: impl Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static,
) -> impl Stream<Item = Result<String, ContentError>> + Send + 'static {
    async_stream::try_stream! {
        futures_util::pin_mut!(events);
        let mut produced = false;
        while let Some(event) = events.next().await {
            match event? {
                StreamEvent::TextDelta { text, .. } if !text.is_empty() => {
                    produced = true;
                    yield text;
                }
                StreamEvent::MessageDelta { stop_reason: StopReason::Safety } => {
                    Err(ContentError::RemoteFailure("reply was blocked".into()))?
                }
                StreamEvent::Usage(usage) => {
                    let span = tracing::Span::current();
                    span.record(GEN_AI_USAGE_INPUT_TOKENS, usage.input_tokens);
                    span.record(GEN_AI_USAGE_OUTPUT_TOKENS, usage.output_tokens);
                }
                StreamEvent::Done => break,
                _ => {}
            }
        }
        if !produced {
            Err(ContentError::RemoteFailure("empty reply".into()))?
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::{EventStream, LlmProvider};
    use etutor_types::llm::{CompletionResponse, ProviderCapabilities, Usage};
    use std::sync::Mutex;

    /// Provider returning a fixed reply and recording the last request.
    struct MockProvider {
        reply: Result<String, LlmError>,
        chunks: Vec<Result<String, LlmError>>,
        capabilities: ProviderCapabilities,
        last_request: Arc<Mutex<Option<CompletionRequest>>>,
    }

    impl MockProvider {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                chunks: Vec::new(),
                capabilities: ProviderCapabilities {
                    streaming: false,
                    structured_output: true,
                    thinking: true,
                    max_context_tokens: 1_000_000,
                    max_output_tokens: 8192,
                },
                last_request: Arc::new(Mutex::new(None)),
            }
        }

        fn failing(err: LlmError) -> Self {
            Self {
                reply: Err(err),
                ..Self::replying("")
            }
        }

        fn streaming(chunks: Vec<Result<String, LlmError>>) -> Self {
            let mut mock = Self::replying("");
            mock.capabilities.streaming = true;
            mock.chunks = chunks;
            mock
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            let content = self.reply.clone()?;
            Ok(CompletionResponse {
                id: "mock-1".to_string(),
                content,
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }

        fn stream(&self, request: CompletionRequest) -> EventStream {
            *self.last_request.lock().unwrap() = Some(request);
            let chunks = self.chunks.clone();
            Box::pin(async_stream::stream! {
                yield Ok(StreamEvent::Connected);
                for (i, chunk) in chunks.into_iter().enumerate() {
                    match chunk {
                        Ok(text) => yield Ok(StreamEvent::TextDelta { index: i as u32, text }),
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
                yield Ok(StreamEvent::MessageDelta { stop_reason: StopReason::EndTurn });
                yield Ok(StreamEvent::Done);
            })
        }
    }

    fn service(provider: MockProvider) -> (ContentService, Arc<Mutex<Option<CompletionRequest>>>) {
        let seen = Arc::clone(&provider.last_request);
        (
            ContentService::new(BoxLlmProvider::new(provider), ContentSettings::default()),
            seen,
        )
    }

    fn lesson() -> Lesson {
        Lesson {
            id: "L4".into(),
            title: "The Role of Data in AI".into(),
            duration_minutes: 15,
            content: "Data is the lifeblood of AI.".into(),
        }
    }

    const VALID_QUIZ: &str = r#"{"questions":[
        {"question":"What matters most?","options":["Data","Luck","Speed","Color"],"correctAnswer":"Data"}
    ]}"#;

    #[tokio::test]
    async fn test_summarize_trims_and_disables_thinking() {
        let (svc, seen) = service(MockProvider::replying("  * one\n* two\n* three \n"));
        let summary = svc.summarize("body").await.unwrap();
        assert_eq!(summary, "* one\n* two\n* three");

        let req = seen.lock().unwrap().clone().unwrap();
        assert_eq!(req.thinking_budget, Some(0));
        assert!(req.messages[0].content.contains("body"));
    }

    #[tokio::test]
    async fn test_summarize_empty_output_is_remote_failure() {
        let (svc, _) = service(MockProvider::replying("   "));
        let err = svc.summarize("body").await.unwrap_err();
        assert!(matches!(err, ContentError::RemoteFailure(_)));
    }

    #[tokio::test]
    async fn test_summarize_upstream_error_is_remote_failure() {
        let (svc, _) = service(MockProvider::failing(LlmError::Timeout));
        let err = svc.summarize("body").await.unwrap_err();
        assert!(matches!(err, ContentError::RemoteFailure(_)));
    }

    #[tokio::test]
    async fn test_generate_quiz_valid_payload() {
        let (svc, seen) = service(MockProvider::replying(VALID_QUIZ));
        let quiz = svc.generate_quiz("body", "The Role of Data in AI").await.unwrap();
        assert_eq!(quiz.title, "Quiz: The Role of Data in AI");
        assert_eq!(quiz.questions[0].correct_answer, "Data");

        let req = seen.lock().unwrap().clone().unwrap();
        let config = req.output_config.unwrap();
        assert!(config.schema.to_string().contains("correctAnswer"));
        assert!(req.messages[0].content.contains("with 3 questions"));
    }

    #[tokio::test]
    async fn test_generate_quiz_accepts_fenced_json() {
        let fenced = format!("```json\n{VALID_QUIZ}\n```");
        let (svc, _) = service(MockProvider::replying(&fenced));
        assert!(svc.generate_quiz("body", "t").await.is_ok());
    }

    #[tokio::test]
    async fn test_generate_quiz_empty_questions_is_schema_violation() {
        let (svc, _) = service(MockProvider::replying(r#"{"questions": []}"#));
        let err = svc.generate_quiz("body", "t").await.unwrap_err();
        assert!(matches!(err, ContentError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_generate_quiz_missing_field_is_schema_violation() {
        let (svc, _) = service(MockProvider::replying(
            r#"{"questions":[{"question":"Q","options":["a","b","c","d"]}]}"#,
        ));
        let err = svc.generate_quiz("body", "t").await.unwrap_err();
        assert!(matches!(err, ContentError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_generate_quiz_transport_error_is_remote_failure() {
        let (svc, _) = service(MockProvider::failing(LlmError::AuthenticationFailed));
        let err = svc.generate_quiz("body", "t").await.unwrap_err();
        assert!(matches!(err, ContentError::RemoteFailure(_)));
    }

    #[tokio::test]
    async fn test_converse_streams_fragments_with_lesson_context() {
        let (svc, seen) = service(MockProvider::streaming(vec![
            Ok("Data ".into()),
            Ok("matters.".into()),
        ]));
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let fragments: Vec<_> = svc.converse(&lesson(), history, "Why?").collect().await;
        let texts: Vec<String> = fragments.into_iter().map(|f| f.unwrap()).collect();
        assert_eq!(texts, ["Data ", "matters."]);

        let req = seen.lock().unwrap().clone().unwrap();
        assert!(req.stream);
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[2].content, "Why?");
        assert!(req.system.unwrap().contains("Title: The Role of Data in AI"));
    }

    #[tokio::test]
    async fn test_converse_mid_stream_error() {
        let (svc, _) = service(MockProvider::streaming(vec![
            Ok("Hel".into()),
            Ok("lo".into()),
            Err(LlmError::Stream("connection reset".into())),
        ]));
        let items: Vec<_> = svc.converse(&lesson(), vec![], "hi").collect().await;
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap(), "Hel");
        assert!(matches!(items[2], Err(ContentError::RemoteFailure(_))));
    }

    #[tokio::test]
    async fn test_converse_without_streaming_yields_one_fragment() {
        let (svc, seen) = service(MockProvider::replying("Complete answer."));
        let items: Vec<_> = svc.converse(&lesson(), vec![], "hi").collect().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap(), "Complete answer.");
        assert!(!seen.lock().unwrap().clone().unwrap().stream);
    }

    #[tokio::test]
    async fn test_converse_empty_stream_is_failure() {
        let (svc, _) = service(MockProvider::streaming(vec![]));
        let items: Vec<_> = svc.converse(&lesson(), vec![], "hi").collect().await;
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }
}
