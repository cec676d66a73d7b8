// Résumé stages: document text extraction and skill/summary synthesis.
// The synthesizer never fails a request; it degrades to keyword matching.

pub mod extractor;
pub mod prompts;
pub mod skills;
