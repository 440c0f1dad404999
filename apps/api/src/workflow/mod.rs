//! Orchestration core — the five user flows, shared by the HTTP and terminal adapters.
//!
//! Flows are sequential: one gateway call at a time, no fan-out. Each flow validates
//! its input before any extraction or gateway call.

pub mod cv_evaluation;
pub mod interview;
pub mod policy;

use crate::errors::AppError;
use crate::extract::Document;

pub use cv_evaluation::{evaluate_cvs, EvaluationResult};
pub use interview::{evaluate_answers, generate_questions, GradingReport};
pub use policy::{ask_policy, upload_policies};

/// Extracts a document's text off the async executor and rejects blank output.
pub(crate) async fn read_document_text(document: Document) -> Result<String, AppError> {
    let name = document.name.clone();

    let extracted = tokio::task::spawn_blocking(move || document.extract_text())
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))?;

    let text = extracted.map_err(|source| AppError::Extraction {
        name: name.clone(),
        source,
    })?;

    if text.trim().is_empty() {
        return Err(AppError::validation(format!(
            "Could not extract text from {name}"
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::docx::fixtures::docx_bytes;

    #[tokio::test]
    async fn test_reads_docx_off_executor() {
        let doc = Document::new("cv.docx", docx_bytes(&["Alice", "", "Engineer"]));
        assert_eq!(read_document_text(doc).await.unwrap(), "Alice\n\nEngineer");
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_with_name() {
        let doc = Document::new("blank.txt", b"   \n\t".to_vec());
        let err = read_document_text(doc).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Could not extract text from blank.txt");
    }

    #[tokio::test]
    async fn test_corrupt_document_is_extraction_error() {
        let doc = Document::new("cv.docx", b"not a zip".to_vec());
        let err = read_document_text(doc).await.unwrap_err();
        assert!(matches!(err, AppError::Extraction { ref name, .. } if name == "cv.docx"));
    }
}
