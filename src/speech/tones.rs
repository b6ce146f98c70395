use std::collections::BTreeMap;

use crate::config::{SpeechSettings, VoiceSettings};

/// Voice id used when neither the requested nor the default tone is mapped.
pub const FALLBACK_VOICE_ID: &str = "en-UK-ruby";

/// Read-only mapping from tone label to provider voice id.
#[derive(Debug, Clone)]
pub struct VoiceTones {
    voices: BTreeMap<String, String>,
    default_tone: String,
}

impl VoiceTones {
    #[must_use]
    pub fn new(voices: BTreeMap<String, String>, default_tone: impl Into<String>) -> Self {
        Self {
            voices,
            default_tone: default_tone.into(),
        }
    }

    #[must_use]
    pub fn from_settings(voices: &VoiceSettings, speech: &SpeechSettings) -> Self {
        Self::new(voices.0.clone(), speech.default_tone.clone())
    }

    /// Voice id for `tone`; unknown tones fall back to the default tone.
    #[must_use]
    pub fn voice_id(&self, tone: &str) -> &str {
        self.voices
            .get(tone)
            .or_else(|| self.voices.get(&self.default_tone))
            .map_or(FALLBACK_VOICE_ID, String::as_str)
    }

    #[must_use]
    pub fn is_known(&self, tone: &str) -> bool {
        self.voices.contains_key(tone)
    }

    #[must_use]
    pub fn default_tone(&self) -> &str {
        &self.default_tone
    }

    /// Available tone labels, sorted.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.voices.keys().map(String::as_str).collect()
    }
}

impl Default for VoiceTones {
    fn default() -> Self {
        Self::from_settings(&VoiceSettings::default(), &SpeechSettings::default())
    }
}
