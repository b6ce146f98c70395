use std::path::PathBuf;

use crate::config::Config;
use crate::pipeline::Pipeline;

/// Shared, read-only server state.
pub struct AppState {
    pub pipeline: Pipeline,
    /// Where uploads are staged while a request is processed.
    pub temp_dir: PathBuf,
    pub default_tone: String,
    /// Request body ceiling for uploads.
    pub max_upload_bytes: usize,
}

impl AppState {
    #[must_use]
    pub fn new(pipeline: Pipeline, config: &Config) -> Self {
        Self {
            pipeline,
            temp_dir: config.temp_dir(),
            default_tone: config.settings.speech.default_tone.clone(),
            max_upload_bytes: config.max_upload_bytes(),
        }
    }
}
