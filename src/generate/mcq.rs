//! Parse `Question:` blocks with `A.`..`D.` option lines into MCQs.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::mcq::{Mcq, OPTION_COUNT};

/// Upper bound on returned questions.
pub const MAX_MCQS: usize = 5;

static QUESTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Question:\s*").expect("valid regex"));

/// One option per line: a single letter A-D, a period, a space, then the option text.
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[A-D]\.[ \t]+(.*)$").expect("valid regex"));

static ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Answer:\s*([A-D])").expect("valid regex"));

/// Parse a single block (text following a `Question:` marker).
///
/// Options are taken in the order they appear; the letters are not used to
/// reorder them.
#[must_use]
pub fn parse_block(block: &str) -> Option<Mcq> {
    let (first_line, rest) = block.split_once('\n').unwrap_or((block, ""));
    let question = first_line.trim();
    if question.is_empty() {
        return None;
    }

    let options: Vec<String> = OPTION_LINE
        .captures_iter(rest)
        .map(|caps| caps[1].trim().to_string())
        .collect();
    let options: [String; OPTION_COUNT] = options.try_into().ok()?;

    let letter = ANSWER.captures(block)?[1].chars().next()?;
    let answer = Mcq::answer_index(letter)?;

    Some(Mcq {
        question: question.to_string(),
        options,
        answer,
    })
}

/// Parse raw model output into at most `limit` questions.
///
/// All blocks are parsed before the limit is applied.
#[must_use]
pub fn parse_mcqs(raw: &str, limit: usize) -> Vec<Mcq> {
    let mut mcqs: Vec<Mcq> = QUESTION_MARKER
        .split(raw)
        .filter(|block| !block.trim().is_empty())
        .filter_map(|block| {
            let mcq = parse_block(block);
            if mcq.is_none() {
                let preview: String = block.chars().take(100).collect();
                tracing::debug!(block = %preview, "discarding mcq block");
            }
            mcq
        })
        .collect();
    mcqs.truncate(limit);
    mcqs
}
