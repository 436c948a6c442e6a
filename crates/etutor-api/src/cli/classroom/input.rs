//! Async line input for the classroom loop.
//!
//! Wraps `rustyline_async::Readline` so input can be awaited alongside
//! command results. Output written through the returned `SharedWriter`
//! appears above the prompt instead of tearing it.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// What the learner did at the prompt.
#[derive(Debug)]
pub enum InputEvent {
    /// A submitted line, trimmed.
    Line(String),
    /// Ctrl+D.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

pub struct ClassroomInput {
    rl: Readline,
}

impl ClassroomInput {
    /// Returns the input handle and the writer for everything printed
    /// while the prompt is active.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        let _ = self.rl.update_prompt(prompt);
    }

    /// Wait for the next line. Safe to race in `tokio::select!`.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Line(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                tracing::debug!(error = %e, "readline closed");
                InputEvent::Eof
            }
        }
    }

    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before printing the final lines.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}
