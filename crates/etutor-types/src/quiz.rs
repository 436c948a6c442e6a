//! Quiz types for E-Tutor.
//!
//! [`QuizPayload`] is the wire shape the generative API is asked to return
//! (its JSON Schema is derived with `schemars`). [`Quiz`] is the validated,
//! immutable form handed to the quiz engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of answer options every question must carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// The question text.
    pub question: String,
    /// An array of 4 possible answers.
    #[schemars(length(min = 4, max = 4))]
    pub options: Vec<String>,
    /// The correct answer from the options array.
    pub correct_answer: String,
}

/// Raw structured response for a quiz request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizPayload {
    pub questions: Vec<QuizQuestion>,
}

impl QuizPayload {
    /// JSON Schema for the payload, without the `$schema` meta key.
    pub fn response_schema() -> serde_json::Value {
        let mut schema = serde_json::to_value(schemars::schema_for!(QuizPayload))
            .unwrap_or(serde_json::Value::Null);
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
        }
        schema
    }

    /// Check the payload against the quiz invariants and attach a title.
    pub fn into_quiz(self, title: impl Into<String>) -> Result<Quiz, QuizViolation> {
        if self.questions.is_empty() {
            return Err(QuizViolation::NoQuestions);
        }
        for (i, q) in self.questions.iter().enumerate() {
            if q.question.trim().is_empty() {
                return Err(QuizViolation::BlankQuestion { index: i });
            }
            if q.options.len() != OPTIONS_PER_QUESTION {
                return Err(QuizViolation::OptionCount {
                    index: i,
                    found: q.options.len(),
                });
            }
            let mut seen = std::collections::HashSet::new();
            if !q.options.iter().all(|o| seen.insert(o.as_str())) {
                return Err(QuizViolation::DuplicateOptions { index: i });
            }
            if !q.options.contains(&q.correct_answer) {
                return Err(QuizViolation::AnswerNotInOptions { index: i });
            }
        }
        Ok(Quiz {
            title: title.into(),
            questions: self.questions,
        })
    }
}

/// Ways a quiz payload can break the quiz invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizViolation {
    #[error("quiz contains no questions")]
    NoQuestions,

    #[error("question {index} has blank text")]
    BlankQuestion { index: usize },

    #[error("question {index} has {found} options, expected 4")]
    OptionCount { index: usize, found: usize },

    #[error("question {index} has duplicate options")]
    DuplicateOptions { index: usize },

    #[error("question {index} names a correct answer that is not among its options")]
    AnswerNotInOptions { index: usize },
}

/// A validated quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// The conventional quiz title for a lesson.
    pub fn title_for(lesson_title: &str) -> String {
        format!("Quiz: {lesson_title}")
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, options: &[&str], correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: correct.to_string(),
        }
    }

    #[test]
    fn test_payload_parses_camel_case() {
        let json = r#"{"questions":[{"question":"Q1","options":["A","B","C","D"],"correctAnswer":"B"}]}"#;
        let payload: QuizPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.questions[0].correct_answer, "B");
    }

    #[test]
    fn test_valid_payload_becomes_quiz() {
        let payload = QuizPayload {
            questions: vec![question("Q1", &["A", "B", "C", "D"], "B")],
        };
        let quiz = payload.into_quiz(Quiz::title_for("Data")).unwrap();
        assert_eq!(quiz.title, "Quiz: Data");
        assert_eq!(quiz.len(), 1);
    }

    #[test]
    fn test_empty_payload_rejected() {
        let payload = QuizPayload { questions: vec![] };
        assert_eq!(payload.into_quiz("t"), Err(QuizViolation::NoQuestions));
    }

    #[test]
    fn test_answer_must_be_an_option() {
        let payload = QuizPayload {
            questions: vec![question("Q1", &["A", "B", "C", "D"], "Z")],
        };
        assert_eq!(
            payload.into_quiz("t"),
            Err(QuizViolation::AnswerNotInOptions { index: 0 })
        );
    }

    #[test]
    fn test_option_count_and_duplicates() {
        let three = QuizPayload {
            questions: vec![question("Q1", &["A", "B", "C"], "A")],
        };
        assert_eq!(
            three.into_quiz("t"),
            Err(QuizViolation::OptionCount { index: 0, found: 3 })
        );

        let dupes = QuizPayload {
            questions: vec![question("Q1", &["A", "A", "C", "D"], "A")],
        };
        assert_eq!(
            dupes.into_quiz("t"),
            Err(QuizViolation::DuplicateOptions { index: 0 })
        );
    }

    #[test]
    fn test_blank_question_rejected() {
        let payload = QuizPayload {
            questions: vec![question("   ", &["A", "B", "C", "D"], "A")],
        };
        assert_eq!(
            payload.into_quiz("t"),
            Err(QuizViolation::BlankQuestion { index: 0 })
        );
    }

    #[test]
    fn test_response_schema_shape() {
        let schema = QuizPayload::response_schema();
        assert!(schema.get("$schema").is_none());
        let text = schema.to_string();
        assert!(text.contains("correctAnswer"));
        assert!(text.contains("questions"));
    }
}
