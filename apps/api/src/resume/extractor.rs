//! Document Extractor — turns an uploaded résumé file into `ExtractedText`.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::profile::ExtractedText;

const ACCEPTED_MEDIA_TYPES: &[&str] = &["application/pdf", "application/octet-stream"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document could not be read: {0}")]
    DocumentRead(String),

    #[error("document contains no readable text")]
    EmptyDocument,
}

/// Pulls the text out of a document stored at `path`.
///
/// Carried in `AppState` as `Arc<dyn DocumentExtractor>`.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError>;
}

/// PDF extractor backed by `pdf-extract`. Parsing is CPU-bound and runs on the
/// blocking pool; a panic inside the parser is reported as a read failure.
pub struct PdfExtractor;

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        let owned = path.to_path_buf();
        let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_by_pages(&owned))
            .await
            .map_err(|e| ExtractError::DocumentRead(format!("PDF parser aborted: {e}")))?
            .map_err(|e| ExtractError::DocumentRead(e.to_string()))?;

        debug!("Extracted {} page(s) from {}", pages.len(), path.display());
        join_pages(pages)
    }
}

/// Concatenates page texts in order with no added separators.
/// Pages without text contribute nothing; an all-blank result is an error.
pub fn join_pages<I>(pages: I) -> Result<ExtractedText, ExtractError>
where
    I: IntoIterator<Item = String>,
{
    let text: String = pages.into_iter().collect();
    ExtractedText::new(text).ok_or(ExtractError::EmptyDocument)
}

/// Rejects uploads whose declared media type is not a PDF.
/// A missing declaration is accepted; the parser has the final word.
pub fn check_media_type(media_type: Option<&str>) -> Result<(), ExtractError> {
    let Some(declared) = media_type else {
        return Ok(());
    };
    let essence = declared
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if ACCEPTED_MEDIA_TYPES.contains(&essence.as_str()) {
        Ok(())
    } else {
        Err(ExtractError::DocumentRead(format!(
            "unsupported media type '{declared}', expected application/pdf"
        )))
    }
}
