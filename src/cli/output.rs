use serde::Serialize;

/// Extracted document text.
#[derive(Debug, Serialize)]
pub struct ExtractOutput {
    pub path: String,
    pub chars: usize,
    pub text: String,
}

/// Audio URLs of a chunked narration.
#[derive(Debug, Serialize)]
pub struct NarrateOutput {
    pub chunks: usize,
    pub audio: Vec<String>,
}

/// Available tones and the default.
#[derive(Debug, Serialize)]
pub struct VoicesOutput {
    pub voices: Vec<VoiceEntry>,
    pub default: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceEntry {
    pub tone: String,
    pub voice_id: String,
}

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}
