//! Offline provider that answers from fixed content.
//!
//! Used with `--offline` and in tests that need a realistic provider
//! without network access. Requests are classified by shape: a structured
//! output request is a quiz, a request with a system instruction is a tutor
//! conversation, anything else is a summary.

use std::time::Duration;

use futures_util::StreamExt;

use etutor_core::llm::provider::{EventStream, LlmProvider};
use etutor_observe::genai_attrs::PROVIDER_CANNED;
use etutor_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, ProviderCapabilities,
    StopReason, StreamEvent, Usage,
};

pub const CANNED_SUMMARY: &str = "\
• Key concepts and definitions are fundamental to understanding the topic
• Practical applications demonstrate real-world relevance and importance
• Continuous learning and practice are essential for mastery";

/// Response body for quiz requests, in the shape the quiz schema asks for.
pub fn canned_quiz_json() -> serde_json::Value {
    serde_json::json!({
        "questions": [
            {
                "question": "What is the main focus of this lesson?",
                "options": [
                    "Understanding basic concepts",
                    "Advanced implementation",
                    "Historical context",
                    "Future predictions"
                ],
                "correctAnswer": "Understanding basic concepts"
            },
            {
                "question": "Which of the following is a key takeaway from this lesson?",
                "options": [
                    "Technology is complex",
                    "Learning requires practice",
                    "AI is transforming industries",
                    "All of the above"
                ],
                "correctAnswer": "All of the above"
            },
            {
                "question": "How can you apply what you learned in this lesson?",
                "options": [
                    "By practicing regularly",
                    "By ignoring the concepts",
                    "By memorizing definitions",
                    "By avoiding technology"
                ],
                "correctAnswer": "By practicing regularly"
            }
        ]
    })
}

fn chat_reply(question: &str) -> String {
    format!(
        "You asked: \"{}\". I'm running offline, so I can only point you back to the \
         lesson text. Re-read the section that covers it and try explaining it in your \
         own words.",
        question.trim()
    )
}

/// Provider returning fixed summary, quiz, and chat content.
pub struct CannedProvider {
    delay: Duration,
    capabilities: ProviderCapabilities,
}

impl CannedProvider {
    /// Create a canned provider that waits `delay` before each answer.
    ///
    /// Streaming replies wait `delay` once, then pace chunks at a tenth of it.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            capabilities: ProviderCapabilities {
                streaming: true,
                structured_output: true,
                thinking: false,
                max_context_tokens: 1_000_000,
                max_output_tokens: 8_192,
            },
        }
    }

    fn answer(request: &CompletionRequest) -> String {
        if request.output_config.is_some() {
            return canned_quiz_json().to_string();
        }
        if request.system.is_some() {
            let question = request
                .messages
                .iter()
                .rev()
                .find(|m| m.role == MessageRole::User)
                .map(|m| m.content.as_str())
                .unwrap_or_default();
            return chat_reply(question);
        }
        CANNED_SUMMARY.to_string()
    }
}

impl Default for CannedProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

impl LlmProvider for CannedProvider {
    fn name(&self) -> &str {
        PROVIDER_CANNED
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tokio::time::sleep(self.delay).await;
        let content = Self::answer(request);
        tracing::debug!(chars = content.len(), "canned completion");
        Ok(CompletionResponse {
            id: format!("canned-{}", uuid::Uuid::now_v7()),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        let delay = self.delay;
        let pace = delay / 10;
        let text = Self::answer(&request);

        let words: Vec<String> = text
            .split_inclusive(' ')
            .map(str::to_string)
            .collect();

        let head = futures_util::stream::once(async move {
            tokio::time::sleep(delay).await;
            Ok::<_, LlmError>(StreamEvent::Connected)
        });
        let body = futures_util::stream::iter(words.into_iter().enumerate()).then(
            move |(index, word)| async move {
                tokio::time::sleep(pace).await;
                Ok::<_, LlmError>(StreamEvent::TextDelta {
                    index: index as u32,
                    text: word,
                })
            },
        );
        let tail = futures_util::stream::iter([
            Ok::<_, LlmError>(StreamEvent::MessageDelta {
                stop_reason: StopReason::EndTurn,
            }),
            Ok(StreamEvent::Done),
        ]);

        Box::pin(head.chain(body).chain(tail))
    }
}
