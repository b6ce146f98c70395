use std::collections::HashMap;
use std::path::Path;

use crate::error::{EduError, Result};
use crate::ingest::text::{
    docx::DocxExtractor, pdf::PdfExtractor, plaintext::PlaintextExtractor, TextExtractor,
};

/// Routes files to the appropriate extractor based on extension.
pub struct Dispatcher {
    extractors: HashMap<String, Box<dyn TextExtractor>>,
}

/// Lowercased extension without the dot, or empty when there is none.
#[must_use]
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        let mut extractors: HashMap<String, Box<dyn TextExtractor>> = HashMap::new();
        extractors.insert("pdf".into(), Box::new(PdfExtractor::new()));
        extractors.insert("docx".into(), Box::new(DocxExtractor::new()));
        extractors.insert("txt".into(), Box::new(PlaintextExtractor::new()));

        Self { extractors }
    }

    /// Check if an extension has an extractor available.
    #[must_use]
    pub fn supports(&self, ext: &str) -> bool {
        self.extractors.contains_key(&ext.to_lowercase())
    }

    /// Supported extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Extract plain text from a file, dispatching on its extension.
    pub fn extract(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(EduError::FileNotFound {
                path: path.to_string_lossy().into(),
            });
        }

        let ext = file_extension(path);
        let extractor = self
            .extractors
            .get(&ext)
            .ok_or_else(|| EduError::UnsupportedFormat { ext: ext.clone() })?;

        tracing::debug!(path = %path.display(), format = extractor.format(), "extracting text");
        extractor.extract(path)
    }

    /// Like [`Dispatcher::extract`], but any failure is logged and yields an empty string.
    #[must_use]
    pub fn extract_text_or_empty(&self, path: &Path) -> String {
        match self.extract(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), "text extraction failed: {e}");
                String::new()
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
