use serde::{Deserialize, Serialize};

use super::{Flashcard, Mcq};

/// Response body of a processing request.
///
/// Every failure mode collapses into [`StudyPack::empty`]; callers cannot
/// distinguish "nothing extracted" from "provider failed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPack {
    pub flashcards: Vec<Flashcard>,
    /// One audio URL per flashcard, same length as `flashcards`.
    pub flashcard_audio: Vec<String>,
    pub mcqs: Vec<Mcq>,
}

impl StudyPack {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty() && self.flashcard_audio.is_empty() && self.mcqs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pack_serializes_to_three_empty_arrays() {
        let json = serde_json::to_string(&StudyPack::empty()).unwrap();
        assert_eq!(json, r#"{"flashcards":[],"flashcard_audio":[],"mcqs":[]}"#);
    }

    #[test]
    fn pack_with_cards_is_not_empty() {
        let pack = StudyPack {
            flashcards: vec![Flashcard::new(1, "Q", "A")],
            flashcard_audio: vec![String::new()],
            mcqs: Vec::new(),
        };
        assert!(!pack.is_empty());
    }
}
