//! Terminal views for the classroom.
//!
//! Every view is returned as a `String` so the loop can hand it to the
//! readline's shared writer in one piece. Markdown (lesson text, summaries,
//! tutor replies) goes through `termimad`, with fenced code highlighted by
//! `syntect`.

use console::style;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use etutor_core::classroom::{Classroom, PanelStatus, SummaryPanel};
use etutor_core::quiz::{AttemptState, QuizAttempt};
use etutor_types::lesson::LessonStatus;

const THEME: &str = "base16-ocean.dark";

pub struct ClassroomRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ClassroomRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render markdown, highlighting fenced code blocks.
    pub fn render_markdown(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut prose = String::new();
        let mut code: Option<(String, String)> = None;

        for line in markdown.lines() {
            if line.trim_start().starts_with("```") {
                match code.take() {
                    Some((lang, buf)) => output.push_str(&self.highlight_code(&buf, &lang)),
                    None => {
                        self.flush_prose(&mut prose, &mut output);
                        let lang = line.trim_start().trim_start_matches('`').trim().to_string();
                        code = Some((lang, String::new()));
                    }
                }
            } else if let Some((_, buf)) = code.as_mut() {
                buf.push_str(line);
                buf.push('\n');
            } else {
                prose.push_str(line);
                prose.push('\n');
            }
        }

        // Unclosed fence: show what arrived.
        if let Some((lang, buf)) = code {
            output.push_str(&self.highlight_code(&buf, &lang));
        }
        self.flush_prose(&mut prose, &mut output);
        output.trim_end().to_string()
    }

    fn flush_prose(&self, prose: &mut String, output: &mut String) {
        if prose.trim().is_empty() {
            prose.clear();
            return;
        }
        output.push_str(&self.skin.term_text(prose).to_string());
        prose.clear();
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let Some(theme) = self.theme_set.themes.get(THEME) else {
            return code.to_string();
        };
        let mut h = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("    {escaped}\x1b[0m\n"));
        }
        output
    }

    /// Indent every line by two spaces to match the rest of the UI.
    pub fn indent(&self, text: &str) -> String {
        text.lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Lesson header, text, and the tutor's opening greeting.
    pub fn lesson_view(&self, classroom: &Classroom) -> String {
        let lesson = classroom.lesson();
        let mut out = String::from("\n");
        if let Some(progress) = classroom.catalog().progress(classroom.current_index()) {
            out.push_str(&format!(
                "  {} {} {} min\n",
                style(progress.to_string()).dim(),
                style("\u{00b7}").dim(),
                style(lesson.duration_minutes).dim()
            ));
        }
        out.push_str(&format!("  {}\n\n", style(&lesson.title).cyan().bold()));
        out.push_str(&self.indent(&self.render_markdown(&lesson.content)));
        out.push_str("\n\n");
        out.push_str(&format!(
            "  {}\n",
            style("/summary for key points, /quiz to test yourself, or just ask a question").dim()
        ));
        if let Some(greeting) = classroom.chat().messages().first() {
            out.push_str(&format!("\n{}\n", self.tutor_line(&greeting.text)));
        }
        out
    }

    /// Syllabus with completed / active / upcoming markers.
    pub fn syllabus(&self, classroom: &Classroom) -> String {
        let mut out = format!("\n  {}\n\n", style("Course syllabus").bold());
        for (i, (lesson, status)) in classroom.syllabus().into_iter().enumerate() {
            let marker = match status {
                LessonStatus::Completed => style("\u{2713}").green().to_string(),
                LessonStatus::Active => style("\u{25cf}").cyan().to_string(),
                LessonStatus::Upcoming => style("\u{25cb}").dim().to_string(),
            };
            let title = match status {
                LessonStatus::Active => style(&lesson.title).cyan().bold().to_string(),
                _ => lesson.title.clone(),
            };
            out.push_str(&format!(
                "  {marker} {}. {title} {}\n",
                i + 1,
                style(format!("({} min)", lesson.duration_minutes)).dim()
            ));
        }
        out
    }

    pub fn summary_panel(&self, panel: &SummaryPanel) -> String {
        match (panel.status, panel.text.as_deref()) {
            (PanelStatus::Loading, _) => format!("  {}", style("Summarizing...").dim()),
            (PanelStatus::Error, text) => format!(
                "\n  {} {}\n",
                style("!").red().bold(),
                text.unwrap_or_default()
            ),
            (PanelStatus::Idle, Some(text)) => format!(
                "\n  {}\n{}\n",
                style("Key points").bold(),
                self.indent(&self.render_markdown(text))
            ),
            (PanelStatus::Idle, None) => String::new(),
        }
    }

    /// The open question with numbered options; the selected one is marked.
    pub fn quiz_question(&self, attempt: &QuizAttempt) -> String {
        let (number, total) = attempt.progress();
        let question = attempt.current_question();
        let selected = attempt.current_answer();

        let mut out = format!(
            "\n  {} {}\n  {}\n\n",
            style(&attempt.quiz().title).cyan().bold(),
            style(format!("\u{00b7} Question {number} of {total}")).dim(),
            style(&question.question).bold()
        );
        for (i, option) in question.options.iter().enumerate() {
            let line = if selected == Some(option.as_str()) {
                format!("  {} {}. {}\n", style("\u{25b8}").cyan(), i + 1, style(option).cyan())
            } else {
                format!("    {}. {}\n", i + 1, option)
            };
            out.push_str(&line);
        }

        let mut hints = vec![format!("1-{} choose", question.options.len())];
        if attempt.can_advance() {
            hints.push(if attempt.is_last_question() {
                "n submit".to_string()
            } else {
                "n next".to_string()
            });
        }
        if attempt.can_go_back() {
            hints.push("p previous".to_string());
        }
        hints.push("x close".to_string());
        out.push_str(&format!("\n  {}\n", style(hints.join("  \u{00b7}  ")).dim()));
        out
    }

    /// Score, verdict, and a per-question review.
    pub fn quiz_results(&self, attempt: &QuizAttempt) -> String {
        let total = attempt.quiz().len();
        let verdict = if attempt.passed() {
            style("Passed").green().bold()
        } else {
            style("Keep practicing").yellow().bold()
        };
        let mut out = format!(
            "\n  {} {}/{} {} {}\n\n",
            style("Score:").bold(),
            attempt.score(),
            total,
            style("\u{00b7}").dim(),
            verdict
        );
        for (i, review) in attempt.review().iter().enumerate() {
            let mark = if review.is_correct {
                style("\u{2713}").green()
            } else {
                style("\u{2717}").red()
            };
            out.push_str(&format!("  {mark} {}. {}\n", i + 1, review.question.question));
            if !review.is_correct {
                out.push_str(&format!(
                    "       {} {}\n",
                    style("your answer:").dim(),
                    review.selected.unwrap_or("-")
                ));
                out.push_str(&format!(
                    "       {} {}\n",
                    style("correct:").dim(),
                    style(&review.question.correct_answer).green()
                ));
            }
        }
        out.push_str(&format!(
            "\n  {}\n",
            style("r retry  \u{00b7}  x close").dim()
        ));
        out
    }

    /// Whichever quiz screen matches the attempt's state.
    pub fn quiz_view(&self, attempt: &QuizAttempt) -> String {
        match attempt.state() {
            AttemptState::Answering(_) => self.quiz_question(attempt),
            AttemptState::Submitted => self.quiz_results(attempt),
        }
    }

    /// Label that opens a tutor reply.
    pub fn tutor_label(&self) -> String {
        format!("  {} ", style("E-Tutor >").cyan().bold())
    }

    /// A complete tutor message on one labelled block.
    pub fn tutor_line(&self, text: &str) -> String {
        format!("{}{}", self.tutor_label(), text)
    }
}

impl Default for ClassroomRenderer {
    fn default() -> Self {
        Self::new()
    }
}
