//! Lesson type for E-Tutor.

use serde::{Deserialize, Serialize};

/// A single lesson of the course syllabus.
///
/// Lessons are compiled in and never change at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// Estimated reading time in minutes.
    pub duration_minutes: u32,
    pub content: String,
}

/// Where a lesson sits relative to the one being studied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Completed,
    Active,
    Upcoming,
}

impl LessonStatus {
    /// Status of the lesson at `index` when `current` is the active index.
    pub fn relative_to(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => LessonStatus::Completed,
            std::cmp::Ordering::Equal => LessonStatus::Active,
            std::cmp::Ordering::Greater => LessonStatus::Upcoming,
        }
    }
}

impl std::fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LessonStatus::Completed => write!(f, "completed"),
            LessonStatus::Active => write!(f, "active"),
            LessonStatus::Upcoming => write!(f, "upcoming"),
        }
    }
}
