//! Google Gemini provider over the Generative Language REST API.

pub mod client;
pub mod streaming;
pub mod types;

pub use client::GeminiProvider;
