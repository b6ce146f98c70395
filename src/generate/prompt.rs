//! Fixed prompt templates for the three generation tasks.

/// Default input ceiling applied before prompting.
pub const MAX_INPUT_CHARS: usize = 3000;

/// The three generation tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Narration,
    Flashcards,
    Mcqs,
}

/// Cut `text` to its first `max_chars` characters, ignoring sentence boundaries.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Build the prompt for `task`, embedding at most `max_chars` of `text`.
#[must_use]
pub fn build_prompt(task: Task, text: &str, max_chars: usize) -> String {
    let content = truncate_chars(text, max_chars);
    let instructions = match task {
        Task::Narration => {
            "Create a concise audio narration of this content for educational purposes. \
             The narration should be conversational, engaging, and under 2500 characters. \
             Focus on the most important concepts and key takeaways. \
             Make it suitable for audio learning: clear, structured, and easy to follow. \
             Strictly avoid any sound effects, intro music, stage directions, or dramatization. \
             Start directly with the explanation, and maintain a professional, factual tone."
        }
        Task::Flashcards => {
            "Generate exactly 10 flashcards from the content below. \
             Each flashcard should have a clear question on the front and a comprehensive answer on the back. \
             Focus on key concepts, definitions, and important facts. \
             Make the back answers detailed but conversational for audio narration. \
             Return in this exact format:\n\
             Front: <question>\n\
             Back: <answer>\n\n\
             Repeat this format for all 10 cards. Do not add any introduction or extra text."
        }
        Task::Mcqs => {
            "Generate exactly 5 multiple choice questions from the content below. \
             Each question must have the format:\n\
             Question: <text>\n\
             A. <option 1>\nB. <option 2>\nC. <option 3>\nD. <option 4>\n\
             Answer: <A/B/C/D>\n\
             Return only this clean format. Do not add any introduction, explanation, or extra commentary."
        }
    };
    format!("{instructions}\n\nContent:\n{content}")
}
