//! Split text into speech-synthesis-safe segments.
//!
//! Lengths are counted in characters. A cut prefers the last sentence end
//! (`.`, `!`, `?`) within 500 characters of the window end, then the last
//! space within 100 characters, then a hard cut at the window size.

/// How far back from the window end a sentence end is still accepted.
const SENTENCE_LOOKBACK: usize = 500;
/// How far back from the window end a space is still accepted.
const WORD_LOOKBACK: usize = 100;

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Character index just past the last acceptable sentence end in `window`.
fn sentence_break(window: &[char], max_chars: usize) -> Option<usize> {
    let idx = window.iter().rposition(|&c| is_sentence_end(c))?;
    (idx + SENTENCE_LOOKBACK > max_chars).then_some(idx + 1)
}

/// Character index of the last acceptable space in `window`.
fn word_break(window: &[char], max_chars: usize) -> Option<usize> {
    let idx = window.iter().rposition(|&c| c == ' ')?;
    (idx > 0 && idx + WORD_LOOKBACK > max_chars).then_some(idx)
}

/// Byte offset of character index `char_idx` in `text`.
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices().nth(char_idx).map_or(text.len(), |(b, _)| b)
}

/// Split `text` into trimmed chunks of at most `max_chars` characters.
///
/// Text that already fits comes back as a single trimmed chunk, except blank
/// text, which yields no chunks rather than one empty chunk. The input is
/// trimmed before the first window. Whitespace at cut points is dropped, so
/// joining the chunks only approximately restores the input.
#[must_use]
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut remaining = text.trim();

    while remaining.chars().count() > max_chars {
        let window: Vec<char> = remaining.chars().take(max_chars).collect();
        let cut = sentence_break(&window, max_chars)
            .or_else(|| word_break(&window, max_chars))
            .unwrap_or(max_chars);
        let at = byte_offset(remaining, cut);

        chunks.push(remaining[..at].trim().to_string());
        remaining = remaining[at..].trim();
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }
    chunks
}

/// Shorten `text` to fit a single synthesis call of `max_chars` characters.
///
/// Cuts after the last sentence end when one lies within 500 characters of
/// the limit, otherwise cuts hard and appends `...`.
#[must_use]
pub fn truncate_for_speech(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let window: Vec<char> = text.chars().take(max_chars).collect();
    match sentence_break(&window, max_chars) {
        Some(cut) => text[..byte_offset(text, cut)].to_string(),
        None => format!("{}...", &text[..byte_offset(text, max_chars)]),
    }
}
