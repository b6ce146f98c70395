//! Tone-aware voice adapter over a [`SpeechProvider`].

use std::sync::Arc;

use futures::future::join_all;

use crate::config::SpeechSettings;
use crate::error::Result;
use crate::models::Flashcard;
use crate::speech::chunker::{split_text, truncate_for_speech};
use crate::speech::client::SpeechProvider;
use crate::speech::tones::VoiceTones;

#[derive(Clone)]
pub struct VoiceClient {
    provider: Arc<dyn SpeechProvider>,
    tones: VoiceTones,
    max_chars: usize,
    chunk_chars: usize,
}

impl VoiceClient {
    #[must_use]
    pub fn new(provider: Arc<dyn SpeechProvider>, tones: VoiceTones, settings: &SpeechSettings) -> Self {
        Self {
            provider,
            tones,
            max_chars: settings.max_chars,
            chunk_chars: settings.chunk_chars,
        }
    }

    #[must_use]
    pub fn tones(&self) -> &VoiceTones {
        &self.tones
    }

    /// Synthesize `text` in the voice mapped from `tone`.
    ///
    /// Blank text yields an empty URL without calling the provider. Text over
    /// the single-call ceiling is shortened first.
    pub async fn synthesize(&self, text: &str, tone: &str) -> Result<String> {
        if text.trim().is_empty() {
            tracing::warn!("empty text provided for voiceover");
            return Ok(String::new());
        }

        let char_count = text.chars().count();
        let text = if char_count > self.max_chars {
            tracing::warn!(
                chars = char_count,
                limit = self.max_chars,
                "text too long for one call, truncating"
            );
            truncate_for_speech(text, self.max_chars)
        } else {
            text.to_string()
        };

        if !self.tones.is_known(tone) {
            tracing::debug!(tone, default = self.tones.default_tone(), "unknown tone, using default");
        }
        let voice_id = self.tones.voice_id(tone);

        let url = self.provider.generate(&text, voice_id).await?;
        tracing::info!(tone, voice_id, chars = text.chars().count(), "audio generated");
        Ok(url)
    }

    /// Like [`VoiceClient::synthesize`], but failures are logged and yield `""`.
    pub async fn synthesize_or_empty(&self, text: &str, tone: &str) -> String {
        match self.synthesize(text, tone).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(provider = self.provider.id(), "speech synthesis failed: {e}");
                String::new()
            }
        }
    }

    /// Narrate arbitrarily long text chunk by chunk, in order.
    ///
    /// Chunks that fail to synthesize are skipped.
    pub async fn long_voiceover(&self, text: &str, tone: &str) -> Vec<String> {
        let chunks = split_text(text, self.chunk_chars);
        let total = chunks.len();
        let mut urls = Vec::with_capacity(total);

        for (i, chunk) in chunks.iter().enumerate() {
            tracing::info!(chunk = i + 1, total, chars = chunk.chars().count(), "generating audio chunk");
            let url = self.synthesize_or_empty(chunk, tone).await;
            if url.is_empty() {
                tracing::warn!(chunk = i + 1, "no audio for chunk");
            } else {
                urls.push(url);
            }
        }
        urls
    }

    /// Fill front and back audio for every card. Calls run concurrently and
    /// fail independently.
    pub async fn flashcard_audio(&self, cards: Vec<Flashcard>, tone: &str) -> Vec<Flashcard> {
        join_all(cards.into_iter().map(|card| async move {
            let back_text = card.spoken_back();
            let (front, back) = tokio::join!(
                self.synthesize_or_empty(&card.front, tone),
                self.synthesize_or_empty(&back_text, tone),
            );
            card.with_audio(front, back)
        }))
        .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::EduError;

    /// Provider double that records calls and echoes a URL per call.
    #[derive(Default)]
    pub(crate) struct RecordingProvider {
        pub calls: Mutex<Vec<(String, String)>>,
        pub fail: bool,
    }

    impl RecordingProvider {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpeechProvider for RecordingProvider {
        fn id(&self) -> &str {
            "recording"
        }

        async fn generate(&self, text: &str, voice_id: &str) -> Result<String> {
            let n = {
                let mut calls = self.calls.lock().unwrap();
                calls.push((text.to_string(), voice_id.to_string()));
                calls.len()
            };
            if self.fail {
                return Err(EduError::Other("provider down".into()));
            }
            Ok(format!("https://audio.test/{n}.mp3"))
        }
    }

    fn voice(provider: Arc<RecordingProvider>) -> VoiceClient {
        let settings = SpeechSettings {
            chunk_chars: 100,
            ..SpeechSettings::default()
        };
        VoiceClient::new(provider, VoiceTones::default(), &settings)
    }

    #[tokio::test]
    async fn empty_text_skips_provider() {
        let provider = Arc::new(RecordingProvider::default());
        let client = voice(provider.clone());
        assert_eq!(client.synthesize("", "Calm Female").await.unwrap(), "");
        assert_eq!(client.synthesize(" \n\t", "Calm Female").await.unwrap(), "");
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_tone_uses_default_voice() {
        let provider = Arc::new(RecordingProvider::default());
        let client = voice(provider.clone());
        let url = client.synthesize("Hello class.", "Whispering Ghost").await.unwrap();
        assert!(!url.is_empty());
        assert_eq!(provider.calls(), vec![("Hello class.".to_string(), "en-UK-ruby".to_string())]);
    }

    #[tokio::test]
    async fn known_tone_selects_voice() {
        let provider = Arc::new(RecordingProvider::default());
        voice(provider.clone())
            .synthesize("Hi", "Enthusiastic Male")
            .await
            .unwrap();
        assert_eq!(provider.calls()[0].1, "en-UK-freddie");
    }

    #[tokio::test]
    async fn long_text_is_truncated_before_call() {
        let provider = Arc::new(RecordingProvider::default());
        let text = format!("{}. {}", "a".repeat(2800), "b".repeat(1000));
        voice(provider.clone()).synthesize(&text, "Calm Female").await.unwrap();
        let sent = &provider.calls()[0].0;
        assert_eq!(sent.chars().count(), 2801);
        assert!(sent.ends_with('.'));
    }

    #[tokio::test]
    async fn long_text_without_sentence_end_is_cut_hard() {
        let provider = Arc::new(RecordingProvider::default());
        let text = "word ".repeat(1000);
        voice(provider.clone()).synthesize(&text, "Calm Female").await.unwrap();
        let sent = &provider.calls()[0].0;
        assert_eq!(sent.chars().count(), 2903);
        assert!(sent.ends_with("..."));
    }

    #[tokio::test]
    async fn provider_failure_collapses_to_empty() {
        let provider = Arc::new(RecordingProvider::failing());
        let client = voice(provider.clone());
        assert!(client.synthesize("Hello", "Calm Female").await.is_err());
        assert_eq!(client.synthesize_or_empty("Hello", "Calm Female").await, "");
    }

    #[tokio::test]
    async fn long_voiceover_synthesizes_each_chunk() {
        let provider = Arc::new(RecordingProvider::default());
        let text = "y".repeat(250);
        let urls = voice(provider.clone()).long_voiceover(&text, "Calm Female").await;
        assert_eq!(urls.len(), 3);
        let sent: Vec<usize> = provider.calls().iter().map(|(t, _)| t.len()).collect();
        assert_eq!(sent, vec![100, 100, 50]);
    }

    #[tokio::test]
    async fn long_voiceover_of_blank_text_is_empty() {
        let provider = Arc::new(RecordingProvider::default());
        assert!(voice(provider.clone()).long_voiceover("  ", "Calm Female").await.is_empty());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn flashcard_audio_fills_front_and_back() {
        let provider = Arc::new(RecordingProvider::default());
        let cards = vec![Flashcard::new(1, "What is ATP?", "Energy currency.")];
        let cards = voice(provider.clone()).flashcard_audio(cards, "Calm Female").await;

        assert!(!cards[0].front_audio.is_empty());
        assert!(!cards[0].back_audio.is_empty());
        assert_ne!(cards[0].front_audio, cards[0].back_audio);
        let texts: Vec<String> = provider.calls().into_iter().map(|(t, _)| t).collect();
        assert!(texts.contains(&"What is ATP?".to_string()));
        assert!(texts.contains(&"The answer is: Energy currency.".to_string()));
    }

    #[tokio::test]
    async fn flashcard_audio_failure_leaves_cards_intact() {
        let provider = Arc::new(RecordingProvider::failing());
        let cards = vec![Flashcard::new(1, "Q1", "A1"), Flashcard::new(3, "Q2", "A2")];
        let cards = voice(provider).flashcard_audio(cards, "Calm Female").await;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].id, 3);
        assert!(cards.iter().all(|c| c.front_audio.is_empty() && c.back_audio.is_empty()));
    }
}
