//! Tutor chat session for the active lesson.
//!
//! Owns the transcript and enforces turn-taking: at most one reply in
//! flight, fragments applied to a single assistant placeholder, and results
//! for abandoned turns ignored.

use etutor_types::chat::{CHAT_ERROR_REPLY, ChatMessage, greeting_for};
use etutor_types::lesson::Lesson;
use etutor_types::llm::Message;
use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

/// Identifies one request/response exchange within a session.
pub type TurnId = u64;

/// Why a message was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendRejected {
    #[error("message is blank")]
    Blank,
    #[error("a reply is already in progress")]
    Busy,
}

/// Everything needed to issue the upstream request for an accepted message.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub turn: TurnId,
    /// Completed exchanges before this one, oldest first.
    pub history: Vec<Message>,
    pub message: String,
}

#[derive(Debug, Clone)]
struct InFlight {
    turn: TurnId,
    placeholder: usize,
    user_text: String,
}

/// Transcript and turn state for one lesson.
#[derive(Debug, Clone)]
pub struct ChatSession {
    lesson_id: String,
    messages: Vec<ChatMessage>,
    /// Exchanges the model has seen, excluding the local greeting and failed turns.
    history: Vec<Message>,
    in_flight: Option<InFlight>,
    next_turn: TurnId,
}

impl ChatSession {
    pub fn new(lesson: &Lesson) -> Self {
        let mut session = Self {
            lesson_id: String::new(),
            messages: Vec::new(),
            history: Vec::new(),
            in_flight: None,
            next_turn: 1,
        };
        session.reset(lesson);
        session
    }

    /// Start over for `lesson` with a single greeting. Any reply in flight is abandoned.
    pub fn reset(&mut self, lesson: &Lesson) {
        if let Some(pending) = self.in_flight.take() {
            debug!(turn = pending.turn, "Abandoning in-flight chat turn");
        }
        self.lesson_id = lesson.id.clone();
        self.messages.clear();
        self.history.clear();
        self.messages.push(ChatMessage::assistant(greeting_for(&lesson.title)));
    }

    pub fn lesson_id(&self) -> &str {
        &self.lesson_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The turn currently awaiting a reply.
    pub fn current_turn(&self) -> Option<TurnId> {
        self.in_flight.as_ref().map(|f| f.turn)
    }

    /// Append the user's message and an empty streaming placeholder.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingTurn, SendRejected> {
        if text.trim().is_empty() {
            return Err(SendRejected::Blank);
        }
        if self.in_flight.is_some() {
            return Err(SendRejected::Busy);
        }

        let turn = self.next_turn;
        self.next_turn += 1;

        self.messages.push(ChatMessage::user(text));
        self.messages.push(ChatMessage::placeholder());
        self.in_flight = Some(InFlight {
            turn,
            placeholder: self.messages.len() - 1,
            user_text: text.to_string(),
        });

        Ok(PendingTurn {
            turn,
            history: self.history.clone(),
            message: text.to_string(),
        })
    }

    fn placeholder_for(&mut self, turn: TurnId) -> Option<usize> {
        match &self.in_flight {
            Some(f) if f.turn == turn => Some(f.placeholder),
            _ => None,
        }
    }

    /// Append a reply fragment. Returns `false` if `turn` is stale.
    pub fn apply_fragment(&mut self, turn: TurnId, fragment: &str) -> bool {
        let Some(idx) = self.placeholder_for(turn) else {
            return false;
        };
        self.messages[idx].text.push_str(fragment);
        true
    }

    /// Finish the reply. Returns `false` if `turn` is stale.
    pub fn complete(&mut self, turn: TurnId) -> bool {
        let Some(idx) = self.placeholder_for(turn) else {
            return false;
        };
        let Some(pending) = self.in_flight.take() else {
            return false;
        };
        let reply = &mut self.messages[idx];
        reply.is_streaming = false;
        self.history.push(Message::user(pending.user_text));
        self.history.push(Message::assistant(reply.text.clone()));
        true
    }

    /// Replace the partial reply with the apology text. Returns `false` if `turn` is stale.
    pub fn fail(&mut self, turn: TurnId) -> bool {
        let Some(idx) = self.placeholder_for(turn) else {
            return false;
        };
        self.in_flight = None;
        let reply = &mut self.messages[idx];
        reply.text = CHAT_ERROR_REPLY.to_string();
        reply.is_streaming = false;
        true
    }

    /// Apply a reply stream to `turn` until it ends or errors.
    ///
    /// `on_fragment` sees each fragment right after it is applied.
    pub async fn drive<S, E>(&mut self, turn: TurnId, stream: S, mut on_fragment: impl FnMut(&str))
    where
        S: Stream<Item = Result<String, E>>,
        E: std::fmt::Display,
    {
        futures_util::pin_mut!(stream);
        while let Some(item) = stream.next().await {
            match item {
                Ok(fragment) => {
                    if self.apply_fragment(turn, &fragment) {
                        on_fragment(&fragment);
                    }
                }
                Err(e) => {
                    warn!(turn, error = %e, "Chat reply failed");
                    self.fail(turn);
                    return;
                }
            }
        }
        self.complete(turn);
    }
}
