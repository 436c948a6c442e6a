//! Quiz-taking state machine.
//!
//! A [`QuizAttempt`] is either answering question `i` or submitted. Only
//! `reset` leaves the submitted state.

use etutor_types::error::QuizError;
use etutor_types::quiz::{Quiz, QuizQuestion};

/// Ratio of correct answers at which an attempt counts as passed.
pub const PASS_RATIO: f64 = 0.7;

/// Where an attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Answering(usize),
    Submitted,
}

/// Per-question outcome shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub question: &'a QuizQuestion,
    pub selected: Option<&'a str>,
    pub is_correct: bool,
}

/// One pass through a quiz.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    quiz: Quiz,
    current: usize,
    selected: Vec<Option<String>>,
    submitted: bool,
}

impl QuizAttempt {
    /// Start an attempt at the first question with nothing selected.
    pub fn open(quiz: Quiz) -> Result<Self, QuizError> {
        if quiz.is_empty() {
            return Err(QuizError::Empty);
        }
        let selected = vec![None; quiz.len()];
        Ok(Self {
            quiz,
            current: 0,
            selected,
            submitted: false,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn state(&self) -> AttemptState {
        if self.submitted {
            AttemptState::Submitted
        } else {
            AttemptState::Answering(self.current)
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.quiz.questions[self.current]
    }

    /// The option chosen for the current question, if any.
    pub fn current_answer(&self) -> Option<&str> {
        self.selected[self.current].as_deref()
    }

    pub fn selected_answers(&self) -> &[Option<String>] {
        &self.selected
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.quiz.len()
    }

    /// Whether `next` would be accepted.
    pub fn can_advance(&self) -> bool {
        !self.submitted && self.current_answer().is_some()
    }

    /// Whether `prev` would move.
    pub fn can_go_back(&self) -> bool {
        !self.submitted && self.current > 0
    }

    /// `(one-based question number, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.quiz.len())
    }

    /// Record `option` for the current question, replacing any earlier choice.
    pub fn select_answer(&mut self, option: &str) -> Result<(), QuizError> {
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        if !self.current_question().options.iter().any(|o| o == option) {
            return Err(QuizError::UnknownOption(option.to_string()));
        }
        self.selected[self.current] = Some(option.to_string());
        Ok(())
    }

    /// Advance to the next question, or submit on the last one.
    pub fn next(&mut self) -> Result<AttemptState, QuizError> {
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        if self.current_answer().is_none() {
            return Err(QuizError::NoAnswerSelected);
        }
        if self.is_last_question() {
            self.submitted = true;
        } else {
            self.current += 1;
        }
        Ok(self.state())
    }

    /// Step back one question. No-op on the first question or once submitted.
    pub fn prev(&mut self) -> AttemptState {
        if self.can_go_back() {
            self.current -= 1;
        }
        self.state()
    }

    /// Number of questions whose selected answer matches the correct one.
    pub fn score(&self) -> usize {
        self.quiz
            .questions
            .iter()
            .zip(&self.selected)
            .filter(|(q, s)| s.as_deref() == Some(q.correct_answer.as_str()))
            .count()
    }

    pub fn passed(&self) -> bool {
        self.score() as f64 / self.quiz.len() as f64 >= PASS_RATIO
    }

    pub fn review(&self) -> Vec<QuestionReview<'_>> {
        self.quiz
            .questions
            .iter()
            .zip(&self.selected)
            .map(|(question, selected)| QuestionReview {
                question,
                selected: selected.as_deref(),
                is_correct: selected.as_deref() == Some(question.correct_answer.as_str()),
            })
            .collect()
    }

    /// Back to the first question with nothing selected, same quiz.
    pub fn reset(&mut self) {
        self.current = 0;
        self.submitted = false;
        self.selected.iter_mut().for_each(|s| *s = None);
    }
}
