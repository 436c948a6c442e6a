//! Lesson catalog: the ordered, read-only syllabus.

mod course;

use etutor_types::lesson::{Lesson, LessonStatus};

/// Position of a lesson within the syllabus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseProgress {
    /// One-based lesson number.
    pub number: usize,
    pub total: usize,
}

impl CourseProgress {
    /// Share of the course completed once this lesson is reached, in percent.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.number * 100) / self.total) as u8
    }
}

impl std::fmt::Display for CourseProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lesson {} of {}", self.number, self.total)
    }
}

/// Ordered list of lessons. Order defines the syllabus.
#[derive(Debug, Clone)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// The compiled-in "Introduction to Modern AI" course.
    pub fn builtin() -> Self {
        let lessons = course::COURSE
            .iter()
            .map(|(id, title, duration, content)| Lesson {
                id: (*id).to_string(),
                title: (*title).to_string(),
                duration_minutes: *duration,
                content: (*content).to_string(),
            })
            .collect();
        Self { lessons }
    }

    /// Build a catalog from an explicit lesson list.
    ///
    /// Returns `None` if the list is empty, ids repeat, or a duration is zero.
    pub fn from_lessons(lessons: Vec<Lesson>) -> Option<Self> {
        if lessons.is_empty() {
            return None;
        }
        let mut ids = std::collections::HashSet::new();
        for lesson in &lessons {
            if lesson.duration_minutes == 0 || !ids.insert(lesson.id.as_str()) {
                return None;
            }
        }
        Some(Self { lessons })
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// The opening lesson. Catalogs are never empty.
    pub fn first(&self) -> &Lesson {
        &self.lessons[0]
    }

    pub fn get(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    /// Find a lesson by id (case-insensitive), returning its index too.
    pub fn find(&self, id: &str) -> Option<(usize, &Lesson)> {
        self.lessons
            .iter()
            .enumerate()
            .find(|(_, l)| l.id.eq_ignore_ascii_case(id))
    }

    /// Resolve a user-supplied reference: a lesson id (`L2`) or a
    /// one-based lesson number (`2`).
    pub fn resolve(&self, reference: &str) -> Option<(usize, &Lesson)> {
        let reference = reference.trim();
        if let Some(found) = self.find(reference) {
            return Some(found);
        }
        let number: usize = reference.parse().ok()?;
        let index = number.checked_sub(1)?;
        self.get(index).map(|l| (index, l))
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn progress(&self, index: usize) -> Option<CourseProgress> {
        (index < self.len()).then_some(CourseProgress {
            number: index + 1,
            total: self.len(),
        })
    }

    /// Syllabus markers for every lesson relative to `current`.
    pub fn statuses(&self, current: usize) -> Vec<LessonStatus> {
        (0..self.len())
            .map(|i| LessonStatus::relative_to(i, current))
            .collect()
    }

    /// Total course length in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.lessons.iter().map(|l| l.duration_minutes).sum()
    }
}

impl Default for LessonCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_course_order() {
        let catalog = LessonCatalog::builtin();
        assert_eq!(catalog.len(), 4);
        let ids: Vec<&str> = catalog.lessons().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["L1", "L2", "L3", "L4"]);
        assert_eq!(catalog.get(0).unwrap().title, "Welcome to Modern AI");
        assert_eq!(catalog.total_minutes(), 75);
    }

    #[test]
    fn test_builtin_lessons_have_content() {
        let catalog = LessonCatalog::builtin();
        for lesson in catalog.lessons() {
            assert!(lesson.duration_minutes > 0);
            assert!(!lesson.content.trim().is_empty());
            assert!(!lesson.content.starts_with('\n'));
        }
    }

    #[test]
    fn test_find_and_resolve() {
        let catalog = LessonCatalog::builtin();
        assert_eq!(catalog.find("l3").unwrap().0, 2);
        assert_eq!(catalog.resolve("2").unwrap().1.id, "L2");
        assert_eq!(catalog.resolve("L4").unwrap().0, 3);
        assert!(catalog.resolve("0").is_none());
        assert!(catalog.resolve("5").is_none());
        assert!(catalog.resolve("intro").is_none());
    }

    #[test]
    fn test_progress() {
        let catalog = LessonCatalog::builtin();
        let p = catalog.progress(1).unwrap();
        assert_eq!(p.to_string(), "Lesson 2 of 4");
        assert_eq!(p.percent(), 50);
        assert!(catalog.progress(4).is_none());
    }

    #[test]
    fn test_statuses() {
        let catalog = LessonCatalog::builtin();
        assert_eq!(
            catalog.statuses(1),
            vec![
                LessonStatus::Completed,
                LessonStatus::Active,
                LessonStatus::Upcoming,
                LessonStatus::Upcoming,
            ]
        );
    }

    #[test]
    fn test_from_lessons_rejects_duplicates_and_empty() {
        assert!(LessonCatalog::from_lessons(vec![]).is_none());
        let lesson = Lesson {
            id: "A".into(),
            title: "A".into(),
            duration_minutes: 5,
            content: "text".into(),
        };
        assert!(LessonCatalog::from_lessons(vec![lesson.clone(), lesson.clone()]).is_none());
        let zero = Lesson {
            duration_minutes: 0,
            ..lesson.clone()
        };
        assert!(LessonCatalog::from_lessons(vec![zero]).is_none());
        assert!(LessonCatalog::from_lessons(vec![lesson]).is_some());
    }
}
