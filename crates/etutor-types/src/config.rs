//! Configuration types for E-Tutor.
//!
//! `TutorConfig` represents the optional `config.toml` that selects the
//! model, endpoint, and generation settings. All fields have defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Top-level configuration for the tutor.
///
/// Loaded from `<config dir>/etutor/config.toml` or an explicit `--config` path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Model name sent to the generative API.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL, without the version path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Questions requested per generated quiz.
    #[serde(default = "default_quiz_question_count")]
    pub quiz_question_count: u32,

    /// Environment variables consulted for the API key, in order.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Vec<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_quiz_question_count() -> u32 {
    3
}

fn default_api_key_env() -> Vec<String> {
    vec!["GEMINI_API_KEY".to_string(), "API_KEY".to_string()]
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            quiz_question_count: default_quiz_question_count(),
            api_key_env: default_api_key_env(),
        }
    }
}
