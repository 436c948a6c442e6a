use thiserror::Error;

use crate::llm::LlmError;
use crate::quiz::QuizViolation;

/// Errors from the content service (summary, quiz, conversation).
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("remote call failed: {0}")]
    RemoteFailure(String),

    #[error("quiz payload rejected: {0}")]
    SchemaViolation(String),
}

impl From<LlmError> for ContentError {
    fn from(err: LlmError) -> Self {
        ContentError::RemoteFailure(err.to_string())
    }
}

impl From<QuizViolation> for ContentError {
    fn from(err: QuizViolation) -> Self {
        ContentError::SchemaViolation(err.to_string())
    }
}

/// Errors from quiz-taking operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("quiz already submitted")]
    AlreadySubmitted,

    #[error("no answer selected for the current question")]
    NoAnswerSelected,

    #[error("'{0}' is not an option for the current question")]
    UnknownOption(String),
}

/// Errors raised while assembling configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not found; set one of: {}", .tried.join(", "))]
    MissingCredential { tried: Vec<String> },

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_maps_to_remote_failure() {
        let err: ContentError = LlmError::Timeout.into();
        assert!(matches!(err, ContentError::RemoteFailure(_)));
    }

    #[test]
    fn test_violation_maps_to_schema_violation() {
        let err: ContentError = QuizViolation::NoQuestions.into();
        assert!(matches!(err, ContentError::SchemaViolation(_)));
    }

    #[test]
    fn test_missing_credential_lists_vars() {
        let err = ConfigError::MissingCredential {
            tried: vec!["GEMINI_API_KEY".into(), "API_KEY".into()],
        };
        assert_eq!(
            err.to_string(),
            "API key not found; set one of: GEMINI_API_KEY, API_KEY"
        );
    }
}
