use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// An uploaded résumé: raw payload plus what the client declared about it.
/// Transient — owned by the pipeline for one request only.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
}

/// Concatenated text of a document. Never blank: construct via `ExtractedText::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Returns `None` for empty or whitespace-only text.
    pub fn new(text: String) -> Option<Self> {
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Skills and narrative summary extracted from a résumé.
/// `skills` is ordered and unique; empty when nothing was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub summary: String,
}
