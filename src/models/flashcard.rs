use serde::{Deserialize, Serialize};

/// A question/answer card parsed from generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Position of the source block in the raw split, not a compacted counter.
    pub id: usize,
    pub front: String,
    pub back: String,
    /// Audio URL for the front, empty until synthesized.
    pub front_audio: String,
    /// Audio URL for the back, empty until synthesized.
    pub back_audio: String,
}

impl Flashcard {
    #[must_use]
    pub fn new(id: usize, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            front_audio: String::new(),
            back_audio: String::new(),
        }
    }

    /// Text spoken for the back of the card.
    #[must_use]
    pub fn spoken_back(&self) -> String {
        format!("The answer is: {}", self.back)
    }

    /// Return the card with audio URLs filled in.
    #[must_use]
    pub fn with_audio(mut self, front_audio: String, back_audio: String) -> Self {
        self.front_audio = front_audio;
        self.back_audio = back_audio;
        self
    }
}
