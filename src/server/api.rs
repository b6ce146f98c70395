use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::error::{EduError, Result};
use crate::ingest::dispatcher::file_extension;
use crate::models::StudyPack;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
    pub default: String,
}

/// A parsed `multipart/form-data` upload.
#[derive(Debug, Default)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub subject: Option<String>,
    pub voice_tone: Option<String>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/voices", get(voices))
        .route("/process", post(process).layer(body_limit))
        .with_state(state)
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Flashcard Learning API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn health() -> Json<HealthResponse> {
    tracing::debug!("health check");
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Flashcard API is running".to_string(),
    })
}

async fn voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    let tones = state.pipeline.voice().tones();
    Json(VoicesResponse {
        voices: tones.labels().into_iter().map(str::to_string).collect(),
        default: tones.default_tone().to_string(),
    })
}

/// `POST /process`. Always answers 200; any failure yields an empty pack.
async fn process(State(state): State<Arc<AppState>>, multipart: Multipart) -> Json<StudyPack> {
    match handle_process(&state, multipart).await {
        Ok(pack) => Json(pack),
        Err(e) => {
            tracing::error!("processing error: {e}");
            Json(StudyPack::empty())
        }
    }
}

async fn handle_process(state: &AppState, multipart: Multipart) -> Result<StudyPack> {
    let upload = read_upload(multipart).await?;
    if let Some(subject) = &upload.subject {
        tracing::debug!(subject = %subject, "subject received");
    }
    let tone = upload
        .voice_tone
        .as_deref()
        .unwrap_or(&state.default_tone)
        .to_string();

    // Removed on drop, whichever way this function returns
    let staged = stage_upload(&state.temp_dir, &upload)?;
    tracing::info!(
        file = %upload.filename,
        bytes = upload.bytes.len(),
        tone = %tone,
        "processing upload"
    );

    let pack = state.pipeline.process_or_empty(staged.path(), &tone).await;
    if let Err(e) = staged.close() {
        tracing::warn!("failed to clean up temp file: {e}");
    }
    Ok(pack)
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    let mut upload = Upload::default();
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| EduError::Other(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.filename = field.file_name().unwrap_or_default().to_string();
                upload.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| EduError::Other(format!("failed to read upload: {e}")))?
                    .to_vec();
                has_file = true;
            }
            "subject" | "voiceTone" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| EduError::Other(format!("failed to read field {name}: {e}")))?;
                if name == "subject" {
                    upload.subject = Some(value);
                } else {
                    upload.voice_tone = Some(value);
                }
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    if !has_file {
        return Err(EduError::Other("missing `file` form field".into()));
    }
    Ok(upload)
}

/// Write the upload to a named temp file keeping only a safe extension.
fn stage_upload(temp_dir: &Path, upload: &Upload) -> Result<tempfile::NamedTempFile> {
    std::fs::create_dir_all(temp_dir)?;
    let ext = file_extension(Path::new(&upload.filename));
    let suffix = if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        format!(".{ext}")
    } else {
        String::new()
    };

    let mut staged = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile_in(temp_dir)?;
    staged.write_all(&upload.bytes)?;
    staged.flush()?;
    Ok(staged)
}
