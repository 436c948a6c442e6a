//! Infrastructure layer for E-Tutor.
//!
//! Contains the concrete LLM providers behind the `LlmProvider` trait
//! defined in `etutor-core` (Gemini REST, offline canned content), API key
//! resolution from the environment, and the TOML config loader.

pub mod config;
pub mod llm;
pub mod secret;
