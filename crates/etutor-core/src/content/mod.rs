//! Generative content for a lesson: summaries, quizzes, tutor replies.

pub mod prompt;
pub mod service;

pub use service::{ContentService, ContentSettings, FragmentStream};

/// Shown in place of a summary that could not be generated.
pub const SUMMARY_ERROR_TEXT: &str = "Sorry, I was unable to generate a summary. Please try again.";

/// Shown when quiz generation fails; the quiz does not open.
pub const QUIZ_ERROR_TEXT: &str = "Sorry, there was an error creating the quiz. Please try again.";
