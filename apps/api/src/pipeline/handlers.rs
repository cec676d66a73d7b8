//! Axum route handler for career requests.

use std::time::Duration;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::DEFAULT_USER_QUERY;
use crate::errors::AppError;
use crate::models::guidance::CareerGuidance;
use crate::models::job::MatchedJob;
use crate::models::profile::ResumeDocument;
use crate::pipeline::{run_pipeline, PipelineOutput};
use crate::resume::skills::ProfileSource;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// Career guidance flattened for clients: list fields become Markdown bullets.
#[derive(Debug, Serialize)]
pub struct GuidanceView {
    pub career_path_suggestion: String,
    pub relevant_skills_gap: String,
    pub actionable_steps: String,
    pub potential_job_titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CareerResponse {
    pub status: &'static str,
    pub message: String,
    pub skill_extraction: ProfileSource,
    pub crew_output: GuidanceView,
    pub matched_jobs: Vec<MatchedJob>,
}

impl From<CareerGuidance> for GuidanceView {
    fn from(guidance: CareerGuidance) -> Self {
        Self {
            career_path_suggestion: guidance.career_path_suggestion,
            relevant_skills_gap: markdown_list(&guidance.skills_gap),
            actionable_steps: markdown_list(&guidance.actionable_steps),
            potential_job_titles: guidance.potential_job_titles,
        }
    }
}

impl From<PipelineOutput> for CareerResponse {
    fn from(output: PipelineOutput) -> Self {
        let message = match output.profile_source {
            ProfileSource::Generated => "Career guidance generated successfully.".to_string(),
            ProfileSource::Fallback => "Career guidance generated. Skills were extracted by \
                keyword matching because AI extraction was unavailable, so results may be incomplete."
                .to_string(),
        };

        Self {
            status: "success",
            message,
            skill_extraction: output.profile_source,
            crew_output: output.result.guidance.into(),
            matched_jobs: output.result.matched_jobs,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/career-guidance  (also POST /process_career_request/)
///
/// Multipart form: `resume_file` (PDF, required) and `user_query` (optional).
/// Runs the full pipeline under the configured request timeout.
pub async fn handle_career_request(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CareerResponse>, AppError> {
    let (document, query) = read_career_form(multipart).await?;

    let request_id = Uuid::new_v4();
    let span = info_span!("career_request", %request_id);
    let timeout_secs = state.config.request_timeout_secs;

    let output = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        run_pipeline(&state, document, &query),
    )
    .instrument(span.clone())
    .await
    .map_err(|_| AppError::Timeout(timeout_secs))??;

    span.in_scope(|| {
        info!(
            "Career request complete: {} skills ({:?}), {} matched jobs",
            output.profile.skills.len(),
            output.profile_source,
            output.result.matched_jobs.len()
        )
    });

    Ok(Json(output.into()))
}

async fn read_career_form(mut multipart: Multipart) -> Result<(ResumeDocument, String), AppError> {
    let mut file: Option<(Bytes, Option<String>, Option<String>)> = None;
    let mut query: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| form_error("Malformed multipart body", e))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume_file") => {
                let media_type = field.content_type().map(str::to_owned);
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| form_error("Could not read resume_file", e))?;
                file = Some((bytes, media_type, file_name));
            }
            Some("user_query") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| form_error("Could not read user_query", e))?;
                query = Some(text);
            }
            _ => {}
        }
    }

    let (bytes, media_type, file_name) =
        file.ok_or_else(|| AppError::Validation("resume_file is required".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("resume_file is empty".to_string()));
    }

    let document = ResumeDocument {
        bytes,
        media_type,
        file_name,
    };
    Ok((document, resolve_query(query)))
}

/// Bodies over the upload limit are 413; every other form problem is a 400.
fn form_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: upload exceeds the size limit"))
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// Blank or missing queries fall back to `DEFAULT_USER_QUERY`.
fn resolve_query(query: Option<String>) -> String {
    query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| DEFAULT_USER_QUERY.to_string())
}

fn markdown_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guidance::GuidanceResult;
    use crate::models::profile::CandidateProfile;

    fn output(source: ProfileSource) -> PipelineOutput {
        PipelineOutput {
            result: GuidanceResult {
                guidance: CareerGuidance {
                    career_path_suggestion: "Data engineering".to_string(),
                    skills_gap: vec!["Spark".to_string(), "Airflow".to_string()],
                    actionable_steps: vec!["Take a Spark course".to_string()],
                    potential_job_titles: vec!["Data Engineer".to_string()],
                },
                matched_jobs: vec![],
            },
            profile: CandidateProfile {
                skills: vec![],
                summary: String::new(),
            },
            profile_source: source,
        }
    }

    #[test]
    fn test_resolve_query_defaults() {
        assert_eq!(resolve_query(None), DEFAULT_USER_QUERY);
        assert_eq!(resolve_query(Some("   ".to_string())), DEFAULT_USER_QUERY);
        assert_eq!(
            resolve_query(Some(" best roles for me ".to_string())),
            "best roles for me"
        );
    }

    #[test]
    fn test_response_flattens_guidance_lists() {
        let response = CareerResponse::from(output(ProfileSource::Generated));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["skill_extraction"], "generated");
        assert_eq!(
            value["crew_output"]["relevant_skills_gap"],
            "- Spark\n- Airflow"
        );
        assert_eq!(value["crew_output"]["actionable_steps"], "- Take a Spark course");
        assert_eq!(
            value["crew_output"]["potential_job_titles"][0],
            "Data Engineer"
        );
        assert!(value["matched_jobs"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_fallback_profile_is_reported_as_partial_success() {
        let response = CareerResponse::from(output(ProfileSource::Fallback));
        assert_eq!(response.status, "success");
        assert!(response.message.contains("keyword matching"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["skill_extraction"], "fallback");
    }
}
