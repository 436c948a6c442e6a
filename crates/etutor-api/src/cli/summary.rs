//! One-shot lesson summary.

use anyhow::Result;
use console::style;

use etutor_core::content::SUMMARY_ERROR_TEXT;

use super::classroom::renderer::ClassroomRenderer;
use super::{resolve_lesson, spinner};
use crate::state::AppState;

/// Summarize one lesson into three key points.
///
/// ```bash
/// etutor summarize L2
/// etutor summarize 2 --json
/// ```
pub async fn summarize_lesson(state: &AppState, reference: &str, json: bool, quiet: bool) -> Result<()> {
    let (_, lesson) = resolve_lesson(&state.catalog, reference)?;

    let spinner = spinner("Summarizing...", quiet || json)?;
    let result = state.content.summarize(&lesson.content).await;
    spinner.finish_and_clear();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(lesson_id = %lesson.id, error = %e, "Summary failed");
            anyhow::bail!(SUMMARY_ERROR_TEXT);
        }
    };

    if json {
        let out = serde_json::json!({
            "lesson_id": lesson.id,
            "title": lesson.title,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if !quiet {
        println!();
        println!(
            "  {} {}",
            style("Key points:").bold(),
            style(&lesson.title).cyan()
        );
        println!();
    }
    let renderer = ClassroomRenderer::new();
    println!("{}", renderer.indent(&renderer.render_markdown(&summary)));
    Ok(())
}
