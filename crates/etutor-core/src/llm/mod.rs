//! LLM provider abstractions for E-Tutor.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `StreamInSpan`: keeps a GenAI span open for a stream's lifetime

pub mod box_provider;
pub mod provider;
pub mod span;

pub use box_provider::BoxLlmProvider;
pub use provider::{EventStream, LlmProvider};
