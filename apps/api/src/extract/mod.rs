//! Document Text Extractor — turns an uploaded PDF, DOCX or plain-text blob into one string.
//!
//! Extraction is CPU-bound and synchronous. Async callers must run it inside
//! `tokio::task::spawn_blocking` (see `workflow::read_document_text`).

pub mod docx;
pub mod pdf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid PDF: {0}")]
    Pdf(String),

    #[error("invalid DOCX: {0}")]
    Docx(String),
}

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Infers the kind from a file name extension (case-insensitive).
    /// Anything that is not `.pdf` or `.docx` is treated as plain text.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") {
            DocumentKind::Docx
        } else {
            DocumentKind::PlainText
        }
    }
}

/// A named byte blob with a declared kind. Immutable once built.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub kind: DocumentKind,
    pub content: Bytes,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let name = name.into();
        let kind = DocumentKind::from_name(&name);
        Self {
            name,
            kind,
            content: content.into(),
        }
    }

    pub fn extract_text(&self) -> Result<String, ExtractionError> {
        extract_text(&self.content, self.kind)
    }
}

/// Extracts plain text from `bytes` according to `kind`.
///
/// An `Ok("")` result is possible (e.g. a scanned PDF with no text layer).
/// Callers must treat blank output as a failed extraction.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => pdf::extract(bytes),
        DocumentKind::Docx => docx::extract(bytes),
        DocumentKind::PlainText => Ok(decode_utf8_ignoring_invalid(bytes)),
    }
}

/// Decodes UTF-8, dropping undecodable byte sequences instead of replacing them.
fn decode_utf8_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name_is_case_insensitive() {
        assert_eq!(DocumentKind::from_name("Resume.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_name("cv.docx"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_name("CV.DocX"), DocumentKind::Docx);
    }

    #[test]
    fn test_unknown_extension_is_plain_text() {
        assert_eq!(DocumentKind::from_name("notes.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_name("README"), DocumentKind::PlainText);
        // .doc is not .docx
        assert_eq!(DocumentKind::from_name("old.doc"), DocumentKind::PlainText);
    }

    #[test]
    fn test_plain_text_drops_invalid_bytes() {
        let bytes = b"Senior \xff\xfeRust engineer";
        let text = extract_text(bytes, DocumentKind::PlainText).unwrap();
        assert_eq!(text, "Senior Rust engineer");
    }

    #[test]
    fn test_plain_text_keeps_multibyte_characters() {
        let text = extract_text("Zoë — 東京".as_bytes(), DocumentKind::PlainText).unwrap();
        assert_eq!(text, "Zoë — 東京");
    }

    #[test]
    fn test_document_new_infers_kind() {
        let doc = Document::new("policy.pdf", b"%PDF-".to_vec());
        assert_eq!(doc.kind, DocumentKind::Pdf);
        assert_eq!(doc.name, "policy.pdf");
    }

    #[test]
    fn test_garbage_declared_as_pdf_fails() {
        let err = extract_text(b"definitely not a pdf", DocumentKind::Pdf).unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_garbage_declared_as_docx_fails() {
        let err = extract_text(b"definitely not a zip", DocumentKind::Docx).unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }
}
