//! Text-to-speech provider boundary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::{Config, SpeechSettings};
use crate::error::{EduError, Result};

const PROVIDER: &str = "murf";

/// Raw text-in, audio-URL-out call to a hosted voice.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &str;

    /// Render `text` with `voice_id` and return the audio file URL.
    async fn generate(&self, text: &str, voice_id: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    audio_file: Option<String>,
}

/// Murf text-to-speech client.
pub struct MurfClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl MurfClient {
    pub fn new(settings: &SpeechSettings, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.settings.speech, config.credentials.murf_api_key.clone())
    }
}

#[async_trait]
impl SpeechProvider for MurfClient {
    fn id(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, text: &str, voice_id: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EduError::Config("MURF_API_KEY is not set".into()))?;

        let resp = self
            .client
            .post(format!("{}/speech/generate", self.base_url))
            .header("api-key", api_key)
            .json(&json!({ "text": text, "voiceId": voice_id }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(EduError::Api {
                provider: PROVIDER.into(),
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = serde_json::from_str(&resp.text().await?)?;
        body.audio_file
            .filter(|url| !url.is_empty())
            .ok_or_else(|| EduError::InvalidResponse {
                provider: PROVIDER.into(),
                detail: "no audio file in response".into(),
            })
    }
}
