pub mod client;
pub mod flashcards;
pub mod mcq;
pub mod prompt;

use std::sync::Arc;

use crate::config::GenerationSettings;
use crate::models::{Flashcard, Mcq};

pub use client::{generate_or_empty, GeminiClient, TextGenerator};
pub use prompt::{build_prompt, Task};

/// Runs the three generation tasks against one provider.
#[derive(Clone)]
pub struct StudyGenerator {
    generator: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
}

impl StudyGenerator {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    async fn run(&self, task: Task, text: &str) -> String {
        let prompt = build_prompt(task, text, self.settings.max_input_chars);
        generate_or_empty(self.generator.as_ref(), &prompt).await
    }

    /// Spoken-style summary text; empty when the provider produced nothing.
    pub async fn narration(&self, text: &str) -> String {
        self.run(Task::Narration, text).await
    }

    pub async fn flashcards(&self, text: &str) -> Vec<Flashcard> {
        let raw = self.run(Task::Flashcards, text).await;
        flashcards::parse_flashcards(&raw, self.settings.max_flashcards)
    }

    pub async fn mcqs(&self, text: &str) -> Vec<Mcq> {
        let raw = self.run(Task::Mcqs, text).await;
        mcq::parse_mcqs(&raw, self.settings.max_mcqs)
    }
}
