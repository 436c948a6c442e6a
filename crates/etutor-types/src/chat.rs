//! Chat transcript types for E-Tutor.
//!
//! A transcript is a linear list of [`ChatMessage`]s exchanged between the
//! learner and the tutor for the active lesson.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

pub use crate::llm::MessageRole;

/// Text that replaces a failed assistant reply.
pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// The assistant greeting that opens every lesson transcript.
pub fn greeting_for(lesson_title: &str) -> String {
    format!("Hello! I'm E-Tutor. How can I help you with the lesson on \"{lesson_title}\"?")
}

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<Sender> for MessageRole {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => MessageRole::User,
            Sender::Assistant => MessageRole::Assistant,
        }
    }
}

/// A single message in a lesson transcript.
///
/// Ids are UUIDv7, so they sort in creation order. `is_streaming` is only
/// ever true on the assistant placeholder of the turn currently in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    #[serde(default)]
    pub is_streaming: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, text: String, is_streaming: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            text,
            sender,
            is_streaming,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), false)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text.into(), false)
    }

    /// An empty assistant message that will receive streamed fragments.
    pub fn placeholder() -> Self {
        Self::new(Sender::Assistant, String::new(), true)
    }
}
