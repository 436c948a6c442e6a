//! One-shot tutor question, streamed to stdout.

use std::io::Write;

use anyhow::Result;
use console::style;

use etutor_core::chat::ChatSession;
use etutor_types::chat::CHAT_ERROR_REPLY;

use super::classroom::renderer::ClassroomRenderer;
use super::resolve_lesson;
use crate::state::AppState;

/// Ask the tutor one question about a lesson.
///
/// ```bash
/// etutor ask L3 "What is a large language model?"
/// ```
pub async fn ask(state: &AppState, reference: &str, question: &str, json: bool, quiet: bool) -> Result<()> {
    let (_, lesson) = resolve_lesson(&state.catalog, reference)?;
    let mut session = ChatSession::new(lesson);

    let pending = session
        .begin_send(question)
        .map_err(|e| anyhow::anyhow!("Cannot send question: {e}"))?;
    let stream = state
        .content
        .converse(lesson, pending.history, &pending.message);

    let live = !json;
    if live && !quiet {
        print!("\n{}", ClassroomRenderer::new().tutor_label());
        let _ = std::io::stdout().flush();
    }
    session
        .drive(pending.turn, stream, |fragment| {
            if live {
                print!("{fragment}");
                let _ = std::io::stdout().flush();
            }
        })
        .await;

    let reply = session
        .messages()
        .last()
        .map(|m| m.text.clone())
        .unwrap_or_default();
    let failed = reply == CHAT_ERROR_REPLY;

    if json {
        let out = serde_json::json!({
            "lesson_id": lesson.id,
            "question": pending.message,
            "answer": reply,
            "ok": !failed,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if failed {
        println!();
        anyhow::bail!(CHAT_ERROR_REPLY);
    } else {
        println!();
        if !quiet {
            println!(
                "\n  {}",
                style(format!("Continue in the classroom: etutor learn --lesson {}", lesson.id)).dim()
            );
        }
    }
    Ok(())
}
