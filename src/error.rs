use thiserror::Error;

#[derive(Error, Debug)]
pub enum EduError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} api error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("invalid {provider} response: {detail}")]
    InvalidResponse { provider: String, detail: String },

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("extraction error in {path}: {detail}")]
    Extract { path: String, detail: String },

    #[error("unsupported file format: {ext}")]
    UnsupportedFormat { ext: String },

    #[error("input too short: {chars} characters (minimum {min})")]
    InputTooShort { chars: usize, min: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, EduError>;
