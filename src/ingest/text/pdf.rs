use std::path::Path;

use crate::error::{EduError, Result};
use crate::ingest::text::TextExtractor;

/// Page-based PDF text extractor.
pub struct PdfExtractor;

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Join the pages of extracted PDF text, one page per line group.
    ///
    /// `pdf-extract` separates pages with form feeds; blank pages are dropped.
    #[must_use]
    pub fn join_pages(source: &str) -> String {
        source
            .split('\x0C')
            .map(str::trim)
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextExtractor for PdfExtractor {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| EduError::Extract {
            path: path.to_string_lossy().into(),
            detail: format!("PDF extraction error: {e}"),
        })?;
        Ok(Self::join_pages(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_single_page() {
        let text = PdfExtractor::join_pages("  This is page one.\nSecond line.  ");
        assert_eq!(text, "This is page one.\nSecond line.");
    }

    #[test]
    fn join_multiple_pages() {
        let text = PdfExtractor::join_pages("Page one\x0CPage two\x0CPage three");
        assert_eq!(text, "Page one\nPage two\nPage three");
    }

    #[test]
    fn empty_pages_skipped() {
        let text = PdfExtractor::join_pages("Content\x0C  \x0C\x0CMore content\x0C");
        assert_eq!(text, "Content\nMore content");
    }

    #[test]
    fn invalid_pdf_is_an_extract_error() {
        let tmp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        std::fs::write(tmp.path(), b"definitely not a pdf").unwrap();
        let err = PdfExtractor::new().extract(tmp.path()).unwrap_err();
        assert!(matches!(err, EduError::Extract { .. }));
    }
}
