//! Quiz taking.

pub mod engine;

pub use engine::{AttemptState, QuestionReview, QuizAttempt};
