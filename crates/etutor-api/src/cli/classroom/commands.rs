//! Slash commands and quiz keys for the classroom loop.
//!
//! Lines starting with `/` are commands. While a quiz is open, short keys
//! (`1`-`4`, `n`, `p`, `r`, `x`) drive it; anything else is a chat message.

use console::style;

/// Slash commands available in the classroom.
#[derive(Debug, PartialEq)]
pub enum ClassroomCommand {
    Help,
    Clear,
    Exit,
    /// Show the syllabus.
    Lessons,
    /// Open a lesson by id or number.
    Lesson(String),
    /// Reprint the current lesson.
    Content,
    Summary,
    Quiz,
    /// Unknown command or missing argument; carries the message to show.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ClassroomCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    Some(match cmd.as_str() {
        "/help" | "/h" | "/?" => ClassroomCommand::Help,
        "/clear" | "/cls" => ClassroomCommand::Clear,
        "/exit" | "/quit" | "/q" => ClassroomCommand::Exit,
        "/lessons" | "/syllabus" => ClassroomCommand::Lessons,
        "/lesson" | "/l" if arg.is_empty() => {
            ClassroomCommand::Unknown("/lesson needs an id or number, e.g. /lesson 2".to_string())
        }
        "/lesson" | "/l" => ClassroomCommand::Lesson(arg.to_string()),
        "/content" | "/read" => ClassroomCommand::Content,
        "/summary" | "/summarize" => ClassroomCommand::Summary,
        "/quiz" => ClassroomCommand::Quiz,
        other => ClassroomCommand::Unknown(format!(
            "Unknown command: {other}. Type /help for available commands."
        )),
    })
}

/// Keys understood while the quiz overlay is open.
#[derive(Debug, PartialEq, Eq)]
pub enum QuizKey {
    /// Zero-based option index.
    Choose(usize),
    Next,
    Prev,
    Retry,
    Close,
}

/// Parse a quiz key. `option_count` bounds the numeric choices.
pub fn parse_quiz_key(input: &str, option_count: usize) -> Option<QuizKey> {
    let key = input.trim().to_lowercase();
    if let Ok(n) = key.parse::<usize>() {
        return (1..=option_count).contains(&n).then(|| QuizKey::Choose(n - 1));
    }
    match key.as_str() {
        "n" | "next" | "submit" => Some(QuizKey::Next),
        "p" | "prev" | "back" => Some(QuizKey::Prev),
        "r" | "retry" => Some(QuizKey::Retry),
        "x" | "close" => Some(QuizKey::Close),
        _ => None,
    }
}

/// Help listing for all commands.
pub fn help_text() -> String {
    let rows = [
        ("/lessons", "Show the syllabus"),
        ("/lesson <n>", "Open lesson n (number or id)"),
        ("/content", "Show the current lesson again"),
        ("/summary", "Summarize the lesson into key points"),
        ("/quiz", "Generate a quiz for the lesson"),
        ("/clear", "Clear the screen"),
        ("/help", "Show this help message"),
        ("/exit", "Leave the classroom"),
    ];
    let mut out = format!("\n  {}\n\n", style("Available commands:").bold());
    for (cmd, desc) in rows {
        out.push_str(&format!("  {}  {desc}\n", style(format!("{cmd:<12}")).cyan()));
    }
    out.push_str(&format!(
        "\n  {}\n  {}\n",
        style("Anything else is sent to the tutor.").dim(),
        style("In a quiz: 1-4 choose, n next, p previous, r retry, x close. Ctrl+D exits.").dim()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ClassroomCommand::Exit));
        assert_eq!(parse("/quit"), Some(ClassroomCommand::Exit));
        assert_eq!(parse("/q"), Some(ClassroomCommand::Exit));
    }

    #[test]
    fn test_parse_lesson_with_argument() {
        assert_eq!(parse("/lesson 3"), Some(ClassroomCommand::Lesson("3".into())));
        assert_eq!(parse("/LESSON   L2 "), Some(ClassroomCommand::Lesson("L2".into())));
        assert!(matches!(parse("/lesson"), Some(ClassroomCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_panels() {
        assert_eq!(parse("/summary"), Some(ClassroomCommand::Summary));
        assert_eq!(parse("/quiz"), Some(ClassroomCommand::Quiz));
        assert_eq!(parse("/content"), Some(ClassroomCommand::Content));
        assert_eq!(parse("/lessons"), Some(ClassroomCommand::Lessons));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("what is a neural network?"), None);
    }

    #[test]
    fn test_parse_unknown() {
        match parse("/foo") {
            Some(ClassroomCommand::Unknown(msg)) => assert!(msg.contains("/foo")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_quiz_keys() {
        assert_eq!(parse_quiz_key("1", 4), Some(QuizKey::Choose(0)));
        assert_eq!(parse_quiz_key(" 4 ", 4), Some(QuizKey::Choose(3)));
        assert_eq!(parse_quiz_key("5", 4), None);
        assert_eq!(parse_quiz_key("0", 4), None);
        assert_eq!(parse_quiz_key("N", 4), Some(QuizKey::Next));
        assert_eq!(parse_quiz_key("back", 4), Some(QuizKey::Prev));
        assert_eq!(parse_quiz_key("x", 4), Some(QuizKey::Close));
        assert_eq!(parse_quiz_key("what?", 4), None);
    }
}
