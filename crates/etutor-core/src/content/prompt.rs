//! Prompt text for the summary, quiz, and tutor requests.

use etutor_types::lesson::Lesson;

/// Prompt asking for three key bullet points of `content`.
pub fn summary_prompt(content: &str) -> String {
    format!(
        "Summarize the following text in three clear and concise key bullet points.\n\
         Focus on the most important concepts and takeaways.\n\
         \n\
         Text to summarize:\n\
         ---\n\
         {content}\n\
         ---\n"
    )
}

/// Prompt asking for a multiple-choice quiz with `questions` questions.
pub fn quiz_prompt(content: &str, questions: u32) -> String {
    format!(
        "Based on the following lesson content, generate a multiple-choice quiz with {questions} questions.\n\
         For each question, provide 4 options and indicate the correct answer. \
         The quiz should test understanding of the key concepts in the text.\n\
         \n\
         Lesson Content:\n\
         ---\n\
         {content}\n\
         ---\n"
    )
}

/// System instruction that keeps the tutor on the current lesson.
pub fn tutor_instruction(lesson: &Lesson) -> String {
    format!(
        "You are a helpful and encouraging tutor for a technology course. Your name is E-Tutor.\n\
         Your goal is to help the user understand the provided lesson content.\n\
         Base your answers strictly on the following lesson material. \
         Do not introduce outside concepts unless directly asked.\n\
         If the user asks something unrelated to the lesson, gently guide them back to the topic. \
         Be concise and clear.\n\
         Here is the current lesson:\n\
         Title: {title}\n\
         Content: {content}",
        title = lesson.title,
        content = lesson.content,
    )
}

/// Strip a surrounding Markdown code fence (```json ... ```) if present.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    match body.split_once('\n') {
        Some((_lang, inner)) => inner.trim(),
        None => body.trim(),
    }
}
