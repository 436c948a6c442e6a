//! Main classroom loop.
//!
//! Learner input and command results arrive on two sources raced in one
//! `tokio::select!`. Both become [`Event`]s applied through
//! [`Classroom::dispatch`]; any [`Command`] it returns is spawned and its
//! events flow back through an unbounded channel. Results for a lesson or
//! chat turn that is no longer current are dropped by the classroom and
//! never printed.

use std::io::Write;

use console::style;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info};

use etutor_core::classroom::{Classroom, Command, Event, PanelStatus};
use etutor_core::content::ContentService;
use etutor_core::quiz::AttemptState;
use etutor_types::chat::CHAT_ERROR_REPLY;

use crate::cli::resolve_lesson;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ClassroomCommand, QuizKey};
use super::input::{ClassroomInput, InputEvent};
use super::renderer::ClassroomRenderer;

/// What a line of input asks for.
#[derive(Debug)]
pub enum Action {
    Dispatch(Event),
    Help,
    Syllabus,
    Content,
    Clear,
    Exit,
    /// A one-line notice for the learner.
    Notice(String),
    Nothing,
}

/// Map a line of input to an action, given what is on screen.
pub fn interpret(classroom: &Classroom, line: &str) -> Action {
    let line = line.trim();
    if line.is_empty() {
        return Action::Nothing;
    }

    if let Some(command) = commands::parse(line) {
        return match command {
            ClassroomCommand::Help => Action::Help,
            ClassroomCommand::Clear => Action::Clear,
            ClassroomCommand::Exit => Action::Exit,
            ClassroomCommand::Lessons => Action::Syllabus,
            ClassroomCommand::Content => Action::Content,
            ClassroomCommand::Summary => Action::Dispatch(Event::RequestSummary),
            ClassroomCommand::Quiz => Action::Dispatch(Event::RequestQuiz),
            ClassroomCommand::Lesson(reference) => match resolve_lesson(classroom.catalog(), &reference) {
                Ok((index, _)) => Action::Dispatch(Event::SelectLesson(index)),
                Err(e) => Action::Notice(e.to_string()),
            },
            ClassroomCommand::Unknown(message) => Action::Notice(message),
        };
    }

    if let Some(attempt) = classroom.quiz() {
        let option_count = attempt.current_question().options.len();
        if let Some(key) = commands::parse_quiz_key(line, option_count) {
            let submitted = attempt.state() == AttemptState::Submitted;
            return match key {
                QuizKey::Choose(_) | QuizKey::Next | QuizKey::Prev if submitted => {
                    Action::Notice("The quiz is submitted: r to retry, x to close.".to_string())
                }
                QuizKey::Choose(i) => {
                    let option = attempt.current_question().options[i].clone();
                    Action::Dispatch(Event::SelectAnswer(option))
                }
                QuizKey::Next if !attempt.can_advance() => {
                    Action::Notice("Choose an answer first.".to_string())
                }
                QuizKey::Next => Action::Dispatch(Event::NextQuestion),
                QuizKey::Prev => Action::Dispatch(Event::PrevQuestion),
                QuizKey::Retry => Action::Dispatch(Event::RetryQuiz),
                QuizKey::Close => Action::Dispatch(Event::CloseQuiz),
            };
        }
    }

    if classroom.chat().is_busy() {
        return Action::Notice("The tutor is still answering, one moment.".to_string());
    }
    Action::Dispatch(Event::SendChat(line.to_string()))
}

/// Spawns commands and forwards their events to the loop.
#[derive(Clone)]
pub struct CommandRunner {
    service: ContentService,
    tx: mpsc::UnboundedSender<Event>,
}

impl CommandRunner {
    pub fn new(service: ContentService) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { service, tx }, rx)
    }

    pub fn spawn(&self, command: Command) {
        debug!(?command, "Spawning classroom command");
        let mut events = command.execute(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
    }
}

/// Classroom state plus where its views are written.
pub struct ClassroomView<W: Write> {
    classroom: Classroom,
    renderer: ClassroomRenderer,
    runner: CommandRunner,
    out: W,
}

impl<W: Write> ClassroomView<W> {
    pub fn new(classroom: Classroom, runner: CommandRunner, out: W) -> Self {
        Self {
            classroom,
            renderer: ClassroomRenderer::new(),
            runner,
            out,
        }
    }

    pub fn classroom(&self) -> &Classroom {
        &self.classroom
    }

    fn show(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn stream(&mut self, text: &str) {
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }

    pub fn notice(&mut self, message: &str) {
        let line = format!("  {} {}", style("i").blue().bold(), style(message).dim());
        self.show(&line);
    }

    pub fn show_lesson(&mut self) {
        let view = self.renderer.lesson_view(&self.classroom);
        self.show(&view);
    }

    pub fn show_syllabus(&mut self) {
        let view = self.renderer.syllabus(&self.classroom);
        self.show(&view);
    }

    pub fn show_help(&mut self) {
        self.show(&commands::help_text());
    }

    /// Prompt matching the current mode.
    pub fn prompt(&self) -> String {
        match self.classroom.quiz().map(|q| q.state()) {
            Some(AttemptState::Answering(_)) => format!("  {} ", style("Answer >").yellow().bold()),
            Some(AttemptState::Submitted) => format!("  {} ", style("Quiz >").yellow().bold()),
            None => format!("  {} ", style("You >").green().bold()),
        }
    }

    /// Apply one event, spawn whatever it asks for, and show the result.
    pub fn apply(&mut self, event: Event) {
        let live_turn = self.classroom.chat().current_turn();
        let pending_summary = self.classroom.pending_summary();
        let pending_quiz = self.classroom.pending_quiz();

        if let Some(command) = self.classroom.dispatch(event.clone()) {
            if let Command::Converse { .. } = &command {
                let label = self.renderer.tutor_label();
                self.stream(&format!("\n{label}"));
            }
            self.runner.spawn(command);
        }

        match event {
            Event::SelectLesson(index) if self.classroom.current_index() == index => {
                self.show_lesson();
            }
            Event::RequestSummary => {
                let view = self.renderer.summary_panel(self.classroom.summary());
                self.show(&view);
            }
            Event::SummaryFinished { request, .. } if pending_summary == Some(request) => {
                let view = self.renderer.summary_panel(self.classroom.summary());
                self.show(&view);
            }
            Event::RequestQuiz => {
                if self.classroom.quiz_status() == PanelStatus::Loading {
                    let line = format!("  {}", style("Generating quiz...").dim());
                    self.show(&line);
                }
            }
            Event::QuizFinished { request, .. } if pending_quiz == Some(request) => self.show_quiz(),
            Event::SelectAnswer(_)
            | Event::NextQuestion
            | Event::PrevQuestion
            | Event::RetryQuiz => self.show_quiz(),
            Event::CloseQuiz => self.notice("Quiz closed."),
            Event::ChatFragment { turn, text } if live_turn == Some(turn) => self.stream(&text),
            Event::ChatFinished { turn } if live_turn == Some(turn) => self.show(""),
            Event::ChatFailed { turn, .. } if live_turn == Some(turn) => {
                let line = format!("\n  {}", style(CHAT_ERROR_REPLY).red());
                self.show(&line);
            }
            _ => {}
        }
    }

    fn show_quiz(&mut self) {
        if let Some(attempt) = self.classroom.quiz() {
            let view = self.renderer.quiz_view(attempt);
            self.show(&view);
        } else if let Some(notice) = self.classroom.quiz_notice() {
            let line = format!("\n  {} {notice}\n", style("!").red().bold());
            self.show(&line);
        }
    }
}

/// Run the interactive classroom, optionally opening on a given lesson.
pub async fn run_classroom(state: &AppState, start: Option<&str>) -> anyhow::Result<()> {
    let mut classroom = Classroom::new(state.catalog.clone());
    if let Some(reference) = start {
        let (index, _) = resolve_lesson(&state.catalog, reference)?;
        classroom.dispatch(Event::SelectLesson(index));
    }

    print_welcome_banner(
        &state.catalog,
        state.content.provider_name(),
        &state.config.model,
    );

    let (runner, mut results) = CommandRunner::new(state.content.clone());
    let (mut input, writer) = ClassroomInput::new(String::new())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    let mut view = ClassroomView::new(classroom, runner, writer);
    view.show_lesson();
    input.set_prompt(&view.prompt());
    info!(lesson_id = %view.classroom().lesson().id, "Classroom opened");

    loop {
        tokio::select! {
            line = input.read_line() => match line {
                InputEvent::Eof => break,
                InputEvent::Interrupted => {
                    view.notice("Press Ctrl+D or type /exit to leave.");
                }
                InputEvent::Line(text) => match interpret(view.classroom(), &text) {
                    Action::Dispatch(event) => view.apply(event),
                    Action::Help => view.show_help(),
                    Action::Syllabus => view.show_syllabus(),
                    Action::Content => view.show_lesson(),
                    Action::Clear => input.clear(),
                    Action::Notice(message) => view.notice(&message),
                    Action::Exit => break,
                    Action::Nothing => {}
                },
            },
            Some(event) = results.recv() => view.apply(event),
        }
        input.set_prompt(&view.prompt());
    }

    view.show(&format!("\n  {}", style("Class dismissed.").dim()));
    input.flush();
    Ok(())
}
