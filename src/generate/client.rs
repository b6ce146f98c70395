//! Generative-text provider boundary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::config::{Config, GenerationSettings};
use crate::error::{EduError, Result};

const PROVIDER: &str = "gemini";

/// Single prompt-in, text-out call to a hosted model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &str;

    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Call `generator`, logging any failure and returning an empty string.
///
/// An empty result means "no content produced", never "valid empty content".
pub async fn generate_or_empty(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(provider = generator.id(), "generation failed: {e}");
            String::new()
        }
    }
}

/// Google Generative Language API client (API key based).
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl GeminiClient {
    pub fn new(settings: &GenerationSettings, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        let model = settings
            .model
            .strip_prefix("models/")
            .unwrap_or(&settings.model)
            .to_string();

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.settings.generation,
            config.credentials.gemini_api_key.clone(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Concatenate the text parts of the first candidate.
    fn response_text(body: &serde_json::Value) -> Result<String> {
        let parts = body["candidates"]
            .as_array()
            .and_then(|candidates| candidates.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .ok_or_else(|| EduError::InvalidResponse {
                provider: PROVIDER.into(),
                detail: "missing candidates content".into(),
            })?;

        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        if text.is_empty() {
            return Err(EduError::InvalidResponse {
                provider: PROVIDER.into(),
                detail: "candidate has no text".into(),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn id(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EduError::Config("GEMINI_API_KEY is not set".into()))?;

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
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

        let json: serde_json::Value = serde_json::from_str(&resp.text().await?)?;
        let text = Self::response_text(&json)?;
        tracing::info!(model = %self.model, chars = text.len(), "generation succeeded");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str) -> GenerationSettings {
        GenerationSettings {
            base_url: base_url.to_string(),
            ..GenerationSettings::default()
        }
    }

    #[test]
    fn model_prefix_is_stripped() {
        let mut s = settings("http://localhost");
        s.model = "models/gemini-2.0-flash".into();
        let client = GeminiClient::new(&s, None).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn response_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Front: A" }, { "text": "\nBack: B" }] }
            }]
        });
        assert_eq!(
            GeminiClient::response_text(&body).unwrap(),
            "Front: A\nBack: B"
        );
    }

    #[test]
    fn response_without_candidates_is_invalid() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(
            GeminiClient::response_text(&body),
            Err(EduError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn generate_posts_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "narration" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&settings(&server.uri()), Some("test-key".into())).unwrap();
        assert_eq!(client.generate("hello").await.unwrap(), "narration");
    }

    #[tokio::test]
    async fn api_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&settings(&server.uri()), Some("k".into())).unwrap();
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, EduError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&settings(&server.uri()), Some("k".into())).unwrap();
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, EduError::Json(_)));
    }

    #[tokio::test]
    async fn soft_generate_returns_empty_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&settings(&server.uri()), Some("k".into())).unwrap();
        assert_eq!(generate_or_empty(&client, "hello").await, "");
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&settings(&server.uri()), None).unwrap();
        assert!(matches!(
            client.generate("hello").await,
            Err(EduError::Config(_))
        ));
    }
}
