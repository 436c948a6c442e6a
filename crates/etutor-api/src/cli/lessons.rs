//! Syllabus listing.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use etutor_core::catalog::LessonCatalog;
use etutor_types::lesson::Lesson;

/// Print the syllabus as a table, or as JSON.
///
/// ```bash
/// etutor lessons
/// etutor lessons --json
/// ```
pub fn list_lessons(catalog: &LessonCatalog, json: bool) -> Result<()> {
    if json {
        let rows: Vec<serde_json::Value> = catalog
            .lessons()
            .iter()
            .enumerate()
            .map(|(i, lesson)| {
                serde_json::json!({
                    "number": i + 1,
                    "id": lesson.id,
                    "title": lesson.title,
                    "duration_minutes": lesson.duration_minutes,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!();
    println!("{}", syllabus_table(catalog.lessons()));
    println!();
    println!(
        "  {} lessons {} {} minutes",
        style(catalog.len()).bold(),
        style("\u{00b7}").dim(),
        style(catalog.total_minutes()).bold()
    );
    println!(
        "  {}",
        style("Start with: etutor learn --lesson <id>").dim()
    );
    println!();
    Ok(())
}

fn syllabus_table(lessons: &[Lesson]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Duration").fg(Color::White),
    ]);

    for (i, lesson) in lessons.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(&lesson.id).fg(Color::Cyan),
            Cell::new(&lesson.title),
            Cell::new(format!("{} min", lesson.duration_minutes)).fg(Color::DarkGrey),
        ]);
    }
    table
}
