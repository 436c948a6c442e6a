//! Business logic for E-Tutor.
//!
//! Lesson catalog, quiz engine, chat session, content service, and the
//! classroom state machine that ties them together. Provider
//! implementations live in `etutor-infra`; this crate depends only on
//! `etutor-types`, the GenAI span names in `etutor-observe`, and the
//! `LlmProvider` seam it defines.

pub mod catalog;
pub mod chat;
pub mod classroom;
pub mod content;
pub mod llm;
pub mod quiz;
