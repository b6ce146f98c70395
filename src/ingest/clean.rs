use std::sync::LazyLock;

use regex::Regex;

/// Characters outside word characters, whitespace and common punctuation.
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\w\s.,!?;:()\-'"/@#$%&*+=<>\[\]{}|\\~`]"#).expect("valid regex")
});

/// Check that trimmed text has at least `min_len` characters.
#[must_use]
pub fn validate_extracted_text(text: &str, min_len: usize) -> bool {
    text.trim().chars().count() >= min_len
}

/// Normalize whitespace and replace unusual symbols with spaces.
#[must_use]
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let collapsed = collapse_whitespace(text);
    let replaced = DISALLOWED.replace_all(&collapsed, " ");
    collapse_whitespace(&replaced)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
