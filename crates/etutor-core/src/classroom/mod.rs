//! Classroom view state.
//!
//! `Classroom` ties together the catalog, the summary panel, the quiz
//! overlay, and the chat session for the selected lesson. All changes go
//! through [`Classroom::dispatch`], which applies one event and may hand
//! back a [`Command`] for the caller to run. Results that arrive for a
//! summary or quiz request that is no longer pending, or for a chat turn
//! that is no longer current, are dropped.

pub mod event;

pub use event::{Command, Event, EventStream, RequestId};

use tracing::{debug, info, warn};

use etutor_types::lesson::{Lesson, LessonStatus};
use etutor_types::quiz::Quiz;

use crate::catalog::LessonCatalog;
use crate::chat::ChatSession;
use crate::content::{QUIZ_ERROR_TEXT, SUMMARY_ERROR_TEXT};
use crate::quiz::QuizAttempt;

/// Status of an asynchronous panel action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// The summary panel under the lesson text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryPanel {
    pub status: PanelStatus,
    /// The summary, or the apology text after a failure.
    pub text: Option<String>,
}

/// Everything the learner currently sees.
#[derive(Debug, Clone)]
pub struct Classroom {
    catalog: LessonCatalog,
    current: usize,
    summary: SummaryPanel,
    quiz_status: PanelStatus,
    quiz_notice: Option<String>,
    quiz: Option<QuizAttempt>,
    chat: ChatSession,
    next_request: RequestId,
    pending_summary: Option<RequestId>,
    pending_quiz: Option<RequestId>,
}

impl Classroom {
    /// Open the classroom on the first lesson.
    pub fn new(catalog: LessonCatalog) -> Self {
        let chat = ChatSession::new(catalog.first());
        Self {
            catalog,
            current: 0,
            summary: SummaryPanel::default(),
            quiz_status: PanelStatus::Idle,
            quiz_notice: None,
            quiz: None,
            chat,
            next_request: 1,
            pending_summary: None,
            pending_quiz: None,
        }
    }

    pub fn catalog(&self) -> &LessonCatalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn lesson(&self) -> &Lesson {
        &self.catalog.lessons()[self.current]
    }

    pub fn summary(&self) -> &SummaryPanel {
        &self.summary
    }

    pub fn quiz_status(&self) -> PanelStatus {
        self.quiz_status
    }

    /// Message explaining why the last quiz request failed.
    pub fn quiz_notice(&self) -> Option<&str> {
        self.quiz_notice.as_deref()
    }

    /// The open quiz overlay, if any.
    pub fn quiz(&self) -> Option<&QuizAttempt> {
        self.quiz.as_ref()
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Syllabus rows: each lesson with its marker.
    pub fn syllabus(&self) -> Vec<(&Lesson, LessonStatus)> {
        self.catalog
            .lessons()
            .iter()
            .zip(self.catalog.statuses(self.current))
            .collect()
    }

    /// The summary request whose result is still wanted.
    pub fn pending_summary(&self) -> Option<RequestId> {
        self.pending_summary
    }

    /// The quiz request whose result is still wanted.
    pub fn pending_quiz(&self) -> Option<RequestId> {
        self.pending_quiz
    }

    fn issue_request(&mut self) -> RequestId {
        let id = self.next_request;
        self.next_request += 1;
        id
    }

    /// Apply one event. Returns the upstream command to run, if any.
    pub fn dispatch(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::SelectLesson(index) => {
                self.select_lesson(index);
                None
            }
            Event::RequestSummary => self.request_summary(),
            Event::SummaryFinished {
                lesson_id,
                request,
                result,
            } => {
                if self.pending_summary != Some(request) {
                    debug!(%lesson_id, request, "Dropping stale summary");
                    return None;
                }
                self.pending_summary = None;
                match result {
                    Ok(text) => {
                        self.summary = SummaryPanel {
                            status: PanelStatus::Idle,
                            text: Some(text),
                        };
                    }
                    Err(e) => {
                        warn!(error = %e, "Summary failed");
                        self.summary = SummaryPanel {
                            status: PanelStatus::Error,
                            text: Some(SUMMARY_ERROR_TEXT.to_string()),
                        };
                    }
                }
                None
            }
            Event::RequestQuiz => self.request_quiz(),
            Event::QuizFinished {
                lesson_id,
                request,
                result,
            } => {
                if self.pending_quiz != Some(request) {
                    debug!(%lesson_id, request, "Dropping stale quiz");
                    return None;
                }
                self.pending_quiz = None;
                self.finish_quiz(result);
                None
            }
            Event::SelectAnswer(option) => {
                if let Some(quiz) = self.quiz.as_mut() {
                    if let Err(e) = quiz.select_answer(&option) {
                        debug!(error = %e, "Answer ignored");
                    }
                }
                None
            }
            Event::NextQuestion => {
                if let Some(quiz) = self.quiz.as_mut() {
                    if let Err(e) = quiz.next() {
                        debug!(error = %e, "Next ignored");
                    }
                }
                None
            }
            Event::PrevQuestion => {
                if let Some(quiz) = self.quiz.as_mut() {
                    quiz.prev();
                }
                None
            }
            Event::RetryQuiz => {
                if let Some(quiz) = self.quiz.as_mut() {
                    quiz.reset();
                }
                None
            }
            Event::CloseQuiz => {
                self.quiz = None;
                if self.pending_quiz.take().is_some() {
                    self.quiz_status = PanelStatus::Idle;
                }
                None
            }
            Event::SendChat(text) => {
                let pending = match self.chat.begin_send(&text) {
                    Ok(p) => p,
                    Err(e) => {
                        debug!(reason = %e, "Chat message not sent");
                        return None;
                    }
                };
                Some(Command::Converse {
                    lesson: self.lesson().clone(),
                    turn: pending.turn,
                    history: pending.history,
                    message: pending.message,
                })
            }
            Event::ChatFragment { turn, text } => {
                self.chat.apply_fragment(turn, &text);
                None
            }
            Event::ChatFinished { turn } => {
                self.chat.complete(turn);
                None
            }
            Event::ChatFailed { turn, error } => {
                if self.chat.fail(turn) {
                    warn!(turn, error = %error, "Chat reply failed");
                }
                None
            }
        }
    }

    fn select_lesson(&mut self, index: usize) {
        let Some(lesson) = self.catalog.get(index) else {
            debug!(index, "Ignoring out-of-range lesson");
            return;
        };
        info!(lesson_id = %lesson.id, title = %lesson.title, "Lesson selected");
        self.chat.reset(lesson);
        self.current = index;
        self.summary = SummaryPanel::default();
        self.quiz_status = PanelStatus::Idle;
        self.quiz_notice = None;
        self.quiz = None;
        self.pending_summary = None;
        self.pending_quiz = None;
    }

    fn request_summary(&mut self) -> Option<Command> {
        if self.summary.status == PanelStatus::Loading {
            return None;
        }
        self.summary = SummaryPanel {
            status: PanelStatus::Loading,
            text: None,
        };
        let request = self.issue_request();
        self.pending_summary = Some(request);
        let lesson = self.lesson();
        Some(Command::Summarize {
            lesson_id: lesson.id.clone(),
            request,
            content: lesson.content.clone(),
        })
    }

    fn request_quiz(&mut self) -> Option<Command> {
        if self.quiz_status == PanelStatus::Loading {
            return None;
        }
        self.quiz_status = PanelStatus::Loading;
        self.quiz_notice = None;
        self.quiz = None;
        let request = self.issue_request();
        self.pending_quiz = Some(request);
        let lesson = self.lesson();
        Some(Command::GenerateQuiz {
            lesson_id: lesson.id.clone(),
            request,
            content: lesson.content.clone(),
            title: lesson.title.clone(),
        })
    }

    fn finish_quiz(&mut self, result: Result<Quiz, etutor_types::error::ContentError>) {
        let opened = result
            .map_err(|e| e.to_string())
            .and_then(|quiz| QuizAttempt::open(quiz).map_err(|e| e.to_string()));
        match opened {
            Ok(attempt) => {
                self.quiz_status = PanelStatus::Idle;
                self.quiz = Some(attempt);
            }
            Err(reason) => {
                warn!(%reason, "Quiz generation failed");
                self.quiz_status = PanelStatus::Error;
                self.quiz_notice = Some(QUIZ_ERROR_TEXT.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentService, ContentSettings};
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::provider::{EventStream as ProviderEvents, LlmProvider};
    use crate::quiz::AttemptState;
    use etutor_types::chat::CHAT_ERROR_REPLY;
    use etutor_types::error::ContentError;
    use etutor_types::llm::{
        CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason,
        StreamEvent, Usage,
    };
    use etutor_types::quiz::QuizQuestion;
    use futures_util::StreamExt;

    /// Streams "Hel", "lo" then fails; non-streaming calls return `reply`.
    struct FlakyProvider {
        reply: String,
        capabilities: ProviderCapabilities,
    }

    impl FlakyProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                capabilities: ProviderCapabilities {
                    streaming: true,
                    structured_output: true,
                    thinking: false,
                    max_context_tokens: 32_000,
                    max_output_tokens: 2048,
                },
            }
        }
    }

    impl LlmProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                id: "r".into(),
                content: self.reply.clone(),
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }

        fn stream(&self, _request: CompletionRequest) -> ProviderEvents {
            Box::pin(async_stream::stream! {
                yield Ok(StreamEvent::TextDelta { index: 0, text: "Hel".into() });
                yield Ok(StreamEvent::TextDelta { index: 0, text: "lo".into() });
                yield Err(LlmError::Stream("connection dropped".into()));
            })
        }
    }

    fn service(reply: &str) -> ContentService {
        ContentService::new(
            BoxLlmProvider::new(FlakyProvider::new(reply)),
            ContentSettings::default(),
        )
    }

    fn quiz() -> Quiz {
        Quiz {
            title: "Quiz: Welcome to Modern AI".into(),
            questions: vec![
                QuizQuestion {
                    question: "Q1".into(),
                    options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    correct_answer: "B".into(),
                },
                QuizQuestion {
                    question: "Q2".into(),
                    options: vec!["E".into(), "F".into(), "G".into(), "H".into()],
                    correct_answer: "G".into(),
                },
            ],
        }
    }

    async fn run(classroom: &mut Classroom, command: Command, svc: &ContentService) {
        let mut events = command.execute(svc);
        while let Some(event) = events.next().await {
            classroom.dispatch(event);
        }
    }

    #[test]
    fn test_new_classroom_starts_on_first_lesson() {
        let classroom = Classroom::new(LessonCatalog::builtin());
        assert_eq!(classroom.current_index(), 0);
        assert_eq!(classroom.lesson().id, "L1");
        assert_eq!(classroom.chat().messages().len(), 1);
        assert!(classroom.quiz().is_none());
        assert_eq!(classroom.syllabus()[0].1, LessonStatus::Active);
    }

    #[test]
    fn test_select_lesson_resets_panels() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::RequestSummary);
        classroom.dispatch(Event::SendChat("hello".into()));

        classroom.dispatch(Event::SelectLesson(2));
        assert_eq!(classroom.lesson().id, "L3");
        assert_eq!(classroom.summary(), &SummaryPanel::default());
        assert_eq!(classroom.chat().messages().len(), 1);
        assert!(
            classroom.chat().messages()[0]
                .text
                .contains("Introduction to Generative AI")
        );
        let markers: Vec<_> = classroom.syllabus().into_iter().map(|(_, s)| s).collect();
        assert_eq!(
            markers,
            vec![
                LessonStatus::Completed,
                LessonStatus::Completed,
                LessonStatus::Active,
                LessonStatus::Upcoming,
            ]
        );
    }

    #[test]
    fn test_out_of_range_lesson_ignored() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::SelectLesson(9));
        assert_eq!(classroom.current_index(), 0);
    }

    #[test]
    fn test_summary_request_while_loading_ignored() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        assert!(matches!(
            classroom.dispatch(Event::RequestSummary),
            Some(Command::Summarize { .. })
        ));
        assert_eq!(classroom.summary().status, PanelStatus::Loading);
        assert!(classroom.dispatch(Event::RequestSummary).is_none());
    }

    #[test]
    fn test_summary_failure_shows_apology() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::RequestSummary);
        let request = classroom.pending_summary().unwrap();
        classroom.dispatch(Event::SummaryFinished {
            lesson_id: "L1".into(),
            request,
            result: Err(ContentError::RemoteFailure("503".into())),
        });
        assert_eq!(classroom.summary().status, PanelStatus::Error);
        assert_eq!(classroom.summary().text.as_deref(), Some(SUMMARY_ERROR_TEXT));
    }

    #[test]
    fn test_stale_summary_dropped() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::RequestSummary);
        let request = classroom.pending_summary().unwrap();
        classroom.dispatch(Event::SelectLesson(1));
        assert!(classroom.pending_summary().is_none());
        classroom.dispatch(Event::SummaryFinished {
            lesson_id: "L1".into(),
            request,
            result: Ok("old summary".into()),
        });
        assert_eq!(classroom.summary(), &SummaryPanel::default());
    }

    #[test]
    fn test_results_dropped_after_leaving_and_returning_to_lesson() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::RequestSummary);
        classroom.dispatch(Event::RequestQuiz);
        let summary_request = classroom.pending_summary().unwrap();
        let quiz_request = classroom.pending_quiz().unwrap();
        assert_ne!(summary_request, quiz_request);

        classroom.dispatch(Event::SelectLesson(1));
        classroom.dispatch(Event::SelectLesson(0));

        classroom.dispatch(Event::SummaryFinished {
            lesson_id: "L1".into(),
            request: summary_request,
            result: Err(ContentError::RemoteFailure("timeout".into())),
        });
        classroom.dispatch(Event::QuizFinished {
            lesson_id: "L1".into(),
            request: quiz_request,
            result: Ok(quiz()),
        });
        assert_eq!(classroom.summary(), &SummaryPanel::default());
        assert!(classroom.quiz().is_none());
        assert_eq!(classroom.quiz_status(), PanelStatus::Idle);
    }

    #[test]
    fn test_only_latest_summary_request_applies() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::RequestSummary);
        let first = classroom.pending_summary().unwrap();
        classroom.dispatch(Event::SelectLesson(0));
        classroom.dispatch(Event::RequestSummary);
        let second = classroom.pending_summary().unwrap();

        classroom.dispatch(Event::SummaryFinished {
            lesson_id: "L1".into(),
            request: first,
            result: Ok("old".into()),
        });
        assert_eq!(classroom.summary().status, PanelStatus::Loading);

        classroom.dispatch(Event::SummaryFinished {
            lesson_id: "L1".into(),
            request: second,
            result: Ok("new".into()),
        });
        assert_eq!(classroom.summary().text.as_deref(), Some("new"));
        assert!(classroom.pending_summary().is_none());
    }

    #[test]
    fn test_close_abandons_loading_quiz() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::RequestQuiz);
        let request = classroom.pending_quiz().unwrap();
        classroom.dispatch(Event::CloseQuiz);
        assert_eq!(classroom.quiz_status(), PanelStatus::Idle);

        classroom.dispatch(Event::QuizFinished {
            lesson_id: "L1".into(),
            request,
            result: Ok(quiz()),
        });
        assert!(classroom.quiz().is_none());
        assert!(classroom.dispatch(Event::RequestQuiz).is_some());
    }

    #[test]
    fn test_quiz_flow_scores_two() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::RequestQuiz);
        assert_eq!(classroom.quiz_status(), PanelStatus::Loading);
        let request = classroom.pending_quiz().unwrap();
        classroom.dispatch(Event::QuizFinished {
            lesson_id: "L1".into(),
            request,
            result: Ok(quiz()),
        });
        assert_eq!(classroom.quiz_status(), PanelStatus::Idle);

        classroom.dispatch(Event::SelectAnswer("B".into()));
        classroom.dispatch(Event::NextQuestion);
        classroom.dispatch(Event::SelectAnswer("G".into()));
        classroom.dispatch(Event::NextQuestion);

        let attempt = classroom.quiz().unwrap();
        assert_eq!(attempt.state(), AttemptState::Submitted);
        assert_eq!(attempt.score(), 2);

        classroom.dispatch(Event::RetryQuiz);
        assert_eq!(classroom.quiz().unwrap().state(), AttemptState::Answering(0));

        classroom.dispatch(Event::CloseQuiz);
        assert!(classroom.quiz().is_none());
    }

    #[test]
    fn test_quiz_failure_keeps_overlay_closed() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        classroom.dispatch(Event::RequestQuiz);
        let request = classroom.pending_quiz().unwrap();
        classroom.dispatch(Event::QuizFinished {
            lesson_id: "L1".into(),
            request,
            result: Err(ContentError::SchemaViolation("no questions".into())),
        });
        assert!(classroom.quiz().is_none());
        assert_eq!(classroom.quiz_status(), PanelStatus::Error);
        assert_eq!(classroom.quiz_notice(), Some(QUIZ_ERROR_TEXT));
    }

    #[test]
    fn test_blank_chat_produces_no_command() {
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        assert!(classroom.dispatch(Event::SendChat("  ".into())).is_none());
        assert_eq!(classroom.chat().messages().len(), 1);
    }

    #[tokio::test]
    async fn test_chat_failure_after_fragments_shows_apology() {
        let svc = service("");
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        let command = classroom.dispatch(Event::SendChat("What is AI?".into())).unwrap();
        assert!(classroom.dispatch(Event::SendChat("again".into())).is_none());

        run(&mut classroom, command, &svc).await;

        // greeting, the question, and the replaced placeholder
        assert_eq!(classroom.chat().messages().len(), 3);
        let reply = classroom.chat().messages().last().unwrap();
        assert_eq!(reply.text, CHAT_ERROR_REPLY);
        assert!(!reply.is_streaming);
        assert!(!classroom.chat().is_busy());
    }

    #[tokio::test]
    async fn test_quiz_command_with_empty_payload_does_not_open() {
        let svc = service(r#"{"questions": []}"#);
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        let command = classroom.dispatch(Event::RequestQuiz).unwrap();
        run(&mut classroom, command, &svc).await;
        assert!(classroom.quiz().is_none());
        assert_eq!(classroom.quiz_status(), PanelStatus::Error);
    }

    #[tokio::test]
    async fn test_summary_command_round_trip() {
        let svc = service("- a\n- b\n- c");
        let mut classroom = Classroom::new(LessonCatalog::builtin());
        let command = classroom.dispatch(Event::RequestSummary).unwrap();
        run(&mut classroom, command, &svc).await;
        assert_eq!(classroom.summary().status, PanelStatus::Idle);
        assert_eq!(classroom.summary().text.as_deref(), Some("- a\n- b\n- c"));
    }
}
