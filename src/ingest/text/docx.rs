//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive; the body lives in `word/document.xml` as
//! `<w:p>` paragraphs containing `<w:t>` text runs.

use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{EduError, Result};
use crate::ingest::text::TextExtractor;

const DOCUMENT_XML: &str = "word/document.xml";

/// Paragraph-by-paragraph DOCX reader.
pub struct DocxExtractor;

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn read_document_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &Path,
    ) -> Result<String> {
        let mut entry = archive.by_name(DOCUMENT_XML).map_err(|e| EduError::Extract {
            path: path.to_string_lossy().into(),
            detail: format!("cannot find {DOCUMENT_XML}: {e}"),
        })?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(xml)
    }

    /// Collect paragraph texts in document order. Empty paragraphs are kept.
    pub fn paragraphs(xml: &str) -> std::result::Result<Vec<String>, String> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"w:p" => current.clear(),
                    b"w:t" => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"w:p" => paragraphs.push(String::new()),
                    b"w:tab" => current.push('\t'),
                    b"w:br" => current.push('\n'),
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text => {
                    let text = e.unescape().map_err(|e| e.to_string())?;
                    current.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(format!(
                        "xml error at position {}: {e}",
                        reader.buffer_position()
                    ))
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

impl TextExtractor for DocxExtractor {
    fn format(&self) -> &'static str {
        "docx"
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let file = std::fs::File::open(path)?;
        let mut archive =
            zip::ZipArchive::new(BufReader::new(file)).map_err(|e| EduError::Extract {
                path: path.to_string_lossy().into(),
                detail: format!("not a docx archive: {e}"),
            })?;

        let xml = Self::read_document_xml(&mut archive, path)?;
        let paragraphs = Self::paragraphs(&xml).map_err(|detail| EduError::Extract {
            path: path.to_string_lossy().into(),
            detail,
        })?;

        Ok(paragraphs.join("\n").trim().to_string())
    }
}
