use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{EduError, Result};
use crate::generate::{GeminiClient, StudyGenerator};
use crate::ingest::clean::validate_extracted_text;
use crate::ingest::Dispatcher;
use crate::models::StudyPack;
use crate::speech::{MurfClient, VoiceClient, VoiceTones};

/// End-to-end request processing: extract, generate, parse, voice.
#[derive(Clone)]
pub struct Pipeline {
    dispatcher: Arc<Dispatcher>,
    generator: StudyGenerator,
    voice: VoiceClient,
    min_text_chars: usize,
    per_card_audio: bool,
}

impl Pipeline {
    #[must_use]
    pub fn new(generator: StudyGenerator, voice: VoiceClient, config: &Config) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new()),
            generator,
            voice,
            min_text_chars: config.settings.pipeline.min_text_chars,
            per_card_audio: config.settings.speech.per_card_audio,
        }
    }

    /// Build the pipeline with the hosted providers named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let generator = StudyGenerator::new(
            Arc::new(GeminiClient::from_config(config)?),
            config.settings.generation.clone(),
        );
        let tones = VoiceTones::from_settings(&config.settings.voices, &config.settings.speech);
        let voice = VoiceClient::new(
            Arc::new(MurfClient::from_config(config)?),
            tones,
            &config.settings.speech,
        );
        Ok(Self::new(generator, voice, config))
    }

    #[must_use]
    pub fn voice(&self) -> &VoiceClient {
        &self.voice
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Extract text off the async runtime; PDF parsing is CPU bound.
    pub async fn extract(&self, path: &Path) -> Result<String> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || dispatcher.extract(&path))
            .await
            .map_err(|e| EduError::Other(format!("extraction task failed: {e}")))?
    }

    /// Turn document text into a study pack.
    ///
    /// The three generation calls run concurrently; a failure in one leaves the
    /// others untouched and only empties its own part of the pack.
    pub async fn process_text(&self, text: &str, tone: &str) -> Result<StudyPack> {
        if !validate_extracted_text(text, self.min_text_chars) {
            return Err(EduError::InputTooShort {
                chars: text.trim().chars().count(),
                min: self.min_text_chars,
            });
        }

        let (narration, flashcards, mcqs) = tokio::join!(
            self.generator.narration(text),
            self.generator.flashcards(text),
            self.generator.mcqs(text),
        );
        tracing::info!(
            narration_chars = narration.len(),
            flashcards = flashcards.len(),
            mcqs = mcqs.len(),
            "generation finished"
        );

        let (narration_url, flashcards) = tokio::join!(
            async {
                if narration.is_empty() {
                    String::new()
                } else {
                    self.voice.synthesize_or_empty(&narration, tone).await
                }
            },
            async {
                if self.per_card_audio {
                    self.voice.flashcard_audio(flashcards, tone).await
                } else {
                    flashcards
                }
            },
        );

        let flashcard_audio = flashcards
            .iter()
            .map(|card| {
                if card.back_audio.is_empty() {
                    narration_url.clone()
                } else {
                    card.back_audio.clone()
                }
            })
            .collect();

        Ok(StudyPack {
            flashcards,
            flashcard_audio,
            mcqs,
        })
    }

    /// Extract `path` and process its text.
    pub async fn process_file(&self, path: &Path, tone: &str) -> Result<StudyPack> {
        let text = self.extract(path).await?;
        self.process_text(&text, tone).await
    }

    /// Like [`Pipeline::extract`], but unreadable or unsupported files yield `""`.
    pub async fn extract_or_empty(&self, path: &Path) -> String {
        let dispatcher = Arc::clone(&self.dispatcher);
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || dispatcher.extract_text_or_empty(&path))
            .await
            .unwrap_or_else(|e| {
                tracing::error!("extraction task failed: {e}");
                String::new()
            })
    }

    /// Like [`Pipeline::process_file`], but every failure yields an empty pack.
    ///
    /// Extraction failures surface as empty text and so take the same
    /// too-short path as a near-empty document.
    pub async fn process_or_empty(&self, path: &Path, tone: &str) -> StudyPack {
        let text = self.extract_or_empty(path).await;
        match self.process_text(&text, tone).await {
            Ok(pack) => pack,
            Err(EduError::InputTooShort { chars, min }) => {
                tracing::info!(chars, min, "input too short, returning empty pack");
                StudyPack::empty()
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "processing failed: {e}");
                StudyPack::empty()
            }
        }
    }

    /// Narrate the whole document in provider-sized chunks.
    pub async fn narrate_file(&self, path: &Path, tone: &str) -> Result<Vec<String>> {
        let text = self.extract(path).await?;
        if text.trim().is_empty() {
            return Err(EduError::InputTooShort { chars: 0, min: 1 });
        }
        Ok(self.voice.long_voiceover(&text, tone).await)
    }
}
