use std::panic::{catch_unwind, AssertUnwindSafe};

use super::ExtractionError;

/// Extracts text page by page, in page order.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| ExtractionError::Pdf("parser aborted on malformed input".to_string()))?
    .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    Ok(join_pages(pages))
}

/// Pages without text contribute nothing; every other page is followed by a newline.
fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut text = String::new();
    for page in pages {
        if page.is_empty() {
            continue;
        }
        text.push_str(&page);
        text.push('\n');
    }
    text
}
