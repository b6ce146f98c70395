pub mod docx;
pub mod pdf;
pub mod plaintext;

use std::path::Path;

use crate::error::Result;

/// Trait for format-specific document readers.
pub trait TextExtractor: Send + Sync {
    /// Format identifier.
    fn format(&self) -> &str;

    /// Read the file and return its plain text, trimmed.
    fn extract(&self, path: &Path) -> Result<String>;
}
