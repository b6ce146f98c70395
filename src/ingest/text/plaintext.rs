use std::path::Path;

use crate::error::Result;
use crate::ingest::text::TextExtractor;

/// Plain text reader: UTF-8 first, Latin-1 when the bytes are not valid UTF-8.
pub struct PlaintextExtractor;

impl Default for PlaintextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaintextExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decode raw bytes. Latin-1 maps every byte to the code point of equal value.
    #[must_use]
    pub fn decode(bytes: Vec<u8>) -> String {
        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("text is not utf-8, decoding as latin-1");
                e.into_bytes().into_iter().map(char::from).collect()
            }
        }
    }
}

impl TextExtractor for PlaintextExtractor {
    fn format(&self) -> &'static str {
        "plaintext"
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(Self::decode(bytes).trim().to_string())
    }
}
