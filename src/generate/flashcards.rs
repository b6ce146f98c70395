//! Parse `Front: ... Back: ...` blocks into flashcards.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Flashcard;

/// Upper bound on returned flashcards.
pub const MAX_FLASHCARDS: usize = 10;

static FRONT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Front:\s*").expect("valid regex"));

const BACK_MARKER: &str = "Back:";

/// Parse a single block (text following a `Front:` marker).
///
/// The block must contain exactly one `Back:` marker. The back is cut at the
/// first blank line so trailing commentary is dropped.
#[must_use]
pub fn parse_block(id: usize, block: &str) -> Option<Flashcard> {
    let parts: Vec<&str> = block.split(BACK_MARKER).collect();
    let [front, back] = parts.as_slice() else {
        return None;
    };

    let front = front.trim();
    let back = back.trim().split("\n\n").next().unwrap_or_default().trim();
    if front.is_empty() || back.is_empty() {
        return None;
    }

    Some(Flashcard::new(id, front, back))
}

/// Parse raw model output into at most `limit` flashcards.
///
/// Ids are the block's index in the raw split, so they can skip values
/// when earlier blocks are discarded. All blocks are parsed before the
/// limit is applied.
#[must_use]
pub fn parse_flashcards(raw: &str, limit: usize) -> Vec<Flashcard> {
    let mut cards: Vec<Flashcard> = FRONT_MARKER
        .split(raw)
        .enumerate()
        .filter(|(_, block)| !block.trim().is_empty())
        .filter_map(|(i, block)| {
            let card = parse_block(i, block);
            if card.is_none() {
                let preview: String = block.chars().take(100).collect();
                tracing::debug!(block = %preview, "discarding flashcard block");
            }
            card
        })
        .collect();
    cards.truncate(limit);
    cards
}
