//! Tutor chat for the active lesson.
//!
//! `ChatSession` owns the transcript and turn-taking rules; the upstream
//! request itself is issued by `ContentService::converse`.

pub mod session;

pub use session::{ChatSession, PendingTurn, SendRejected, TurnId};
