use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EduError, Result};

/// Default config filename, looked up in the working directory.
const CONFIG_FILE: &str = "edunarrator.toml";
/// Environment variable holding the generative-text API key.
const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the speech API key.
const MURF_KEY_VAR: &str = "MURF_API_KEY";

/// Process-wide configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path the settings were (or would be) loaded from.
    pub config_path: PathBuf,
    /// User settings loaded from the TOML file.
    pub settings: UserSettings,
    /// Provider credentials read from the environment.
    pub credentials: Credentials,
}

/// API keys for the external providers.
#[derive(Clone, Default)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub murf_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("murf_api_key", &self.murf_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    /// Read keys from the environment. Blank values count as missing.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |var: &str| {
            std::env::var(var)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            gemini_api_key: read(GEMINI_KEY_VAR),
            murf_api_key: read(MURF_KEY_VAR),
        }
    }
}

/// User-configurable settings from edunarrator.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// HTTP server configuration.
    pub server: ServerSettings,
    /// Generative-text provider configuration.
    pub generation: GenerationSettings,
    /// Speech provider configuration.
    pub speech: SpeechSettings,
    /// Request pipeline configuration.
    pub pipeline: PipelineSettings,
    /// Tone label to provider voice id.
    pub voices: VoiceSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
    /// Upload size ceiling in MB.
    pub max_upload_mb: u32,
    /// Directory for transient uploads (system temp dir when unset).
    pub temp_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:5173".into(),
                "https://studi-io.vercel.app".into(),
            ],
            max_upload_mb: 20,
            temp_dir: None,
        }
    }
}

/// Generative-text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub base_url: String,
    pub model: String,
    /// Input text is cut to this many characters before prompting.
    pub max_input_chars: usize,
    pub max_flashcards: usize,
    pub max_mcqs: usize,
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-2.0-flash".into(),
            max_input_chars: 3000,
            max_flashcards: 10,
            max_mcqs: 5,
            timeout_secs: 60,
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub base_url: String,
    /// Single-call ceiling; the provider hard limit is 3000.
    pub max_chars: usize,
    /// Chunk size for long narration.
    pub chunk_chars: usize,
    pub default_tone: String,
    /// Synthesize front/back audio for every flashcard.
    pub per_card_audio: bool,
    pub timeout_secs: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.murf.ai/v1".into(),
            max_chars: 2900,
            chunk_chars: 2900,
            default_tone: "Calm Female".into(),
            per_card_audio: true,
            timeout_secs: 60,
        }
    }
}

/// Pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Trimmed text shorter than this produces an empty study pack.
    pub min_text_chars: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { min_text_chars: 50 }
    }
}

/// Tone label to voice id mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceSettings(pub BTreeMap<String, String>);

impl Default for VoiceSettings {
    fn default() -> Self {
        let pairs = [
            ("Calm Female", "en-UK-ruby"),
            ("Energetic Male", "en-UK-theo"),
            ("Professional Female", "en-UK-hazel"),
            ("Enthusiastic Male", "en-UK-freddie"),
            ("Gentle Female", "en-UK-juliet"),
            ("Authoritative Male", "en-UK-gabriel"),
        ];
        Self(
            pairs
                .into_iter()
                .map(|(tone, id)| (tone.to_string(), id.to_string()))
                .collect(),
        )
    }
}

impl Config {
    /// Create config from a settings file path. Missing or invalid files use defaults.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            config_path,
            settings,
            credentials: Credentials::from_env(),
        }
    }

    /// Create config from `edunarrator.toml` in the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| EduError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd.join(CONFIG_FILE)))
    }

    /// Use an explicit path when given, otherwise the working directory default.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Ok(Self::new(p)),
            None => Self::from_cwd(),
        }
    }

    /// Load settings from the TOML file if it exists and parses.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), "ignoring invalid config: {e}");
                None
            }
        }
    }

    /// Save current settings to the config file.
    pub fn save_settings(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| EduError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Directory for transient uploads.
    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        self.settings
            .server
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Upload ceiling in bytes.
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.settings.server.max_upload_mb as usize * 1024 * 1024
    }
}
