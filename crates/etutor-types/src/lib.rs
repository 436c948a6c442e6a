//! Shared domain types for E-Tutor.
//!
//! This crate contains the domain types used across the tutor: lessons,
//! chat transcript messages, quizzes, LLM request/response shapes,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, schemars.

pub mod chat;
pub mod config;
pub mod error;
pub mod lesson;
pub mod llm;
pub mod quiz;
