//! Generate a quiz and take it with arrow-key selection.

use anyhow::Result;
use console::style;
use dialoguer::Select;

use etutor_core::content::QUIZ_ERROR_TEXT;
use etutor_core::quiz::{AttemptState, QuizAttempt};
use etutor_types::quiz::Quiz;

use super::classroom::renderer::ClassroomRenderer;
use super::{resolve_lesson, spinner};
use crate::state::AppState;

const BACK: &str = "< Previous question";

/// What the learner picked on one question screen.
#[derive(Debug, PartialEq, Eq)]
enum Pick {
    Option(usize),
    Back,
}

/// Menu items for the current question, with a back entry when allowed.
fn menu_items(attempt: &QuizAttempt) -> Vec<String> {
    let mut items = attempt.current_question().options.clone();
    if attempt.can_go_back() {
        items.push(BACK.to_string());
    }
    items
}

fn pick_from(attempt: &QuizAttempt, selection: usize) -> Pick {
    if selection < attempt.current_question().options.len() {
        Pick::Option(selection)
    } else {
        Pick::Back
    }
}

/// Walk one attempt through to submission. Selecting an option records it
/// and moves on; the last question submits.
fn answer_all(attempt: &mut QuizAttempt) -> Result<()> {
    while let AttemptState::Answering(_) = attempt.state() {
        let (number, total) = attempt.progress();
        println!();
        println!(
            "  {} {}",
            style(format!("Question {number} of {total}")).dim(),
            style(&attempt.current_question().question).bold()
        );

        let items = menu_items(attempt);
        let default = attempt
            .current_answer()
            .and_then(|a| items.iter().position(|i| i == a))
            .unwrap_or(0);
        let selection = Select::new().items(&items).default(default).interact()?;

        match pick_from(attempt, selection) {
            Pick::Option(i) => {
                let option = attempt.current_question().options[i].clone();
                attempt.select_answer(&option)?;
                attempt.next()?;
            }
            Pick::Back => {
                attempt.prev();
            }
        }
    }
    Ok(())
}

/// Generate a quiz for a lesson and run it until the learner is done.
///
/// ```bash
/// etutor quiz L1
/// etutor quiz 1 --json   # print the generated quiz only
/// ```
pub async fn take_quiz(state: &AppState, reference: &str, json: bool, quiet: bool) -> Result<()> {
    let (_, lesson) = resolve_lesson(&state.catalog, reference)?;

    let spinner = spinner("Generating quiz...", quiet || json)?;
    let result = state.content.generate_quiz(&lesson.content, &lesson.title).await;
    spinner.finish_and_clear();

    let quiz: Quiz = match result {
        Ok(quiz) => quiz,
        Err(e) => {
            tracing::warn!(lesson_id = %lesson.id, error = %e, "Quiz generation failed");
            anyhow::bail!(QUIZ_ERROR_TEXT);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&quiz.title).cyan().bold());
    let mut attempt = QuizAttempt::open(quiz)?;
    let renderer = ClassroomRenderer::new();

    loop {
        answer_all(&mut attempt)?;
        println!("{}", renderer.quiz_results(&attempt));

        let again = Select::new()
            .items(&["Retry quiz", "Done"])
            .default(if attempt.passed() { 1 } else { 0 })
            .interact()?;
        if again == 0 {
            attempt.reset();
        } else {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use etutor_types::quiz::QuizQuestion;

    fn attempt() -> QuizAttempt {
        let q = |text: &str| QuizQuestion {
            question: text.to_string(),
            options: ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect(),
            correct_answer: "A".to_string(),
        };
        QuizAttempt::open(Quiz {
            title: "Quiz: Test".into(),
            questions: vec![q("One?"), q("Two?")],
        })
        .unwrap()
    }

    #[test]
    fn test_menu_has_back_only_after_first_question() {
        let mut attempt = attempt();
        assert_eq!(menu_items(&attempt).len(), 4);

        attempt.select_answer("A").unwrap();
        attempt.next().unwrap();
        let items = menu_items(&attempt);
        assert_eq!(items.len(), 5);
        assert_eq!(items[4], BACK);
        assert_eq!(pick_from(&attempt, 4), Pick::Back);
        assert_eq!(pick_from(&attempt, 2), Pick::Option(2));
    }
}
