//! Welcome banner shown when the classroom opens.

use console::style;

use etutor_core::catalog::LessonCatalog;
use etutor_observe::genai_attrs::PROVIDER_CANNED;

/// Print the course name, size, and the provider answering questions.
pub fn print_welcome_banner(catalog: &LessonCatalog, provider: &str, model: &str) {
    println!();
    println!(
        "  {} {}",
        style("E-Tutor").cyan().bold(),
        style("\u{00b7} Introduction to Modern AI").bold()
    );
    println!(
        "  {}",
        style(format!(
            "{} lessons, {} minutes",
            catalog.len(),
            catalog.total_minutes()
        ))
        .dim()
    );
    println!();
    let source = if provider == PROVIDER_CANNED {
        style("offline (canned content)".to_string()).yellow()
    } else {
        style(format!("{provider} \u{00b7} {model}")).dim()
    };
    println!("  {}  {}", style("Tutor:").bold(), source);
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
}
