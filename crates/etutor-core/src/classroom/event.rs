//! Events fed into the classroom and the commands it hands back.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use etutor_types::error::ContentError;
use etutor_types::lesson::Lesson;
use etutor_types::llm::Message;
use etutor_types::quiz::Quiz;

use crate::chat::TurnId;
use crate::content::ContentService;

/// Identifies one summary or quiz request. A result is applied only while
/// its request is still the pending one.
pub type RequestId = u64;

/// Something the learner did, or the outcome of an earlier command.
#[derive(Debug, Clone)]
pub enum Event {
    SelectLesson(usize),
    RequestSummary,
    SummaryFinished {
        lesson_id: String,
        request: RequestId,
        result: Result<String, ContentError>,
    },
    RequestQuiz,
    QuizFinished {
        lesson_id: String,
        request: RequestId,
        result: Result<Quiz, ContentError>,
    },
    SelectAnswer(String),
    NextQuestion,
    PrevQuestion,
    RetryQuiz,
    CloseQuiz,
    SendChat(String),
    ChatFragment {
        turn: TurnId,
        text: String,
    },
    ChatFinished {
        turn: TurnId,
    },
    ChatFailed {
        turn: TurnId,
        error: ContentError,
    },
}

/// Upstream work requested by a state transition.
#[derive(Debug, Clone)]
pub enum Command {
    Summarize {
        lesson_id: String,
        request: RequestId,
        content: String,
    },
    GenerateQuiz {
        lesson_id: String,
        request: RequestId,
        content: String,
        title: String,
    },
    Converse {
        lesson: Lesson,
        turn: TurnId,
        history: Vec<Message>,
        message: String,
    },
}

/// Events reporting a command's outcome, in order.
pub type EventStream = Pin<Box<dyn Stream<Item = Event> + Send + 'static>>;

impl Command {
    /// Run against `service`. The returned stream always ends with a
    /// finishing event (`SummaryFinished`, `QuizFinished`, `ChatFinished`
    /// or `ChatFailed`).
    pub fn execute(self, service: &ContentService) -> EventStream {
        let service = service.clone();
        match self {
            Command::Summarize {
                lesson_id,
                request,
                content,
            } => Box::pin(async_stream::stream! {
                let result = service.summarize(&content).await;
                yield Event::SummaryFinished { lesson_id, request, result };
            }),
            Command::GenerateQuiz {
                lesson_id,
                request,
                content,
                title,
            } => Box::pin(async_stream::stream! {
                let result = service.generate_quiz(&content, &title).await;
                yield Event::QuizFinished { lesson_id, request, result };
            }),
            Command::Converse {
                lesson,
                turn,
                history,
                message,
            } => {
                let mut fragments = service.converse(&lesson, history, &message);
                Box::pin(async_stream::stream! {
                    while let Some(item) = fragments.next().await {
                        match item {
                            Ok(text) => yield Event::ChatFragment { turn, text },
                            Err(error) => {
                                yield Event::ChatFailed { turn, error };
                                return;
                            }
                        }
                    }
                    yield Event::ChatFinished { turn };
                })
            }
        }
    }
}
