//! Pipeline Orchestrator — runs one career request end to end.
//!
//! Flow: stage upload to temp file → extract text → synthesize profile →
//!       match jobs → synthesize guidance.
//!
//! The staged temp file is released on every exit path: explicitly once the
//! stages finish, or by its drop guard if the request future is cancelled.

pub mod handlers;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::guidance::{synthesize_guidance, GuidanceError};
use crate::jobs::matcher::match_jobs;
use crate::models::guidance::GuidanceResult;
use crate::models::profile::{CandidateProfile, ResumeDocument};
use crate::resume::extractor::{check_media_type, ExtractError};
use crate::resume::skills::{synthesize_profile, ProfileSource};
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Guidance(#[from] GuidanceError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Everything one successful run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub result: GuidanceResult,
    pub profile: CandidateProfile,
    /// `Fallback` marks a partial success of the profile stage.
    pub profile_source: ProfileSource,
}

pub async fn run_pipeline(
    state: &AppState,
    document: ResumeDocument,
    query: &str,
) -> Result<PipelineOutput, PipelineError> {
    check_media_type(document.media_type.as_deref())?;

    let staged = stage_document(&state.config.upload_dir, &document).await?;
    info!(
        "Staged {} ({} bytes) at {}",
        document.file_name.as_deref().unwrap_or("upload"),
        document.bytes.len(),
        staged.path().display()
    );

    let outcome = run_stages(state, staged.path(), query).await;

    let path = staged.path().to_path_buf();
    match staged.close() {
        Ok(()) => info!("Cleaned up temporary file: {}", path.display()),
        Err(e) => warn!("Failed to delete temporary file {}: {e}", path.display()),
    }

    outcome
}

async fn run_stages(
    state: &AppState,
    path: &Path,
    query: &str,
) -> Result<PipelineOutput, PipelineError> {
    let text = state.extractor.extract(path).await?;
    info!("Extracted {} characters of resume text", text.as_str().len());

    let profile_outcome = synthesize_profile(&text, state.llm.as_ref()).await;
    let profile = profile_outcome.profile;

    let limits = state.config.limits;
    let matches = match_jobs(&profile, state.catalog.postings(), limits.max_matched_jobs);
    info!(
        "Matched {} of {} catalog postings",
        matches.len(),
        state.catalog.len()
    );

    let result =
        synthesize_guidance(&profile, query, &matches, state.llm.as_ref(), &limits).await?;

    Ok(PipelineOutput {
        result,
        profile,
        profile_source: profile_outcome.source,
    })
}

/// Writes the upload to a fresh temp file inside `dir`. The returned guard
/// deletes the file when closed or dropped.
async fn stage_document(dir: &Path, document: &ResumeDocument) -> anyhow::Result<NamedTempFile> {
    let dir = dir.to_path_buf();
    let bytes = document.bytes.clone();

    tokio::task::spawn_blocking(move || {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile_in(&dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        file.write_all(&bytes)
            .context("Failed to write uploaded document")?;
        file.flush().context("Failed to flush uploaded document")?;
        Ok::<_, anyhow::Error>(file)
    })
    .await
    .context("Temp file staging task failed")?
}
