//! Guidance Synthesizer — turns profile + query + matched jobs into `GuidanceResult`.
//!
//! Response handling, in order:
//! 1. generation call fails           → `GuidanceError::Generation`
//! 2. take the outermost `{...}` span  (tolerates prose around the object)
//! 3. no span                          → `GuidanceError::OutputFormat`
//! 4. parse + validate the span        → `GuidanceError::OutputSchema` on failure
//! 5. replace echoed `matched_jobs` with the caller's `matches`

use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::GuidanceLimits;
use crate::guidance::prompts::{GUIDANCE_PROMPT_TEMPLATE, GUIDANCE_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{GenerationRequest, LlmError, ResponseFormat, TextGenerator};
use crate::models::guidance::{CareerGuidance, GuidanceResult};
use crate::models::job::MatchedJob;
use crate::models::profile::CandidateProfile;

const GUIDANCE_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("guidance generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("model output contains no JSON object")]
    OutputFormat { raw: String },

    #[error("model output does not match the guidance schema: {reason}")]
    OutputSchema { reason: String, raw: String },
}

pub async fn synthesize_guidance(
    profile: &CandidateProfile,
    query: &str,
    matches: &[MatchedJob],
    llm: &dyn TextGenerator,
    limits: &GuidanceLimits,
) -> Result<GuidanceResult, GuidanceError> {
    let prompt = build_guidance_prompt(profile, query, matches, limits);
    let system = format!("{GUIDANCE_SYSTEM} {JSON_ONLY_INSTRUCTION}");

    let raw = llm
        .generate(GenerationRequest {
            system: &system,
            prompt: &prompt,
            response_format: ResponseFormat::JsonObject,
            temperature: GUIDANCE_TEMPERATURE,
        })
        .await?;

    let candidate = extract_json_object(&raw).ok_or_else(|| GuidanceError::OutputFormat {
        raw: raw.clone(),
    })?;
    debug!("Guidance JSON candidate is {} bytes", candidate.len());

    let parsed: GuidanceResult =
        serde_json::from_str(candidate).map_err(|e| GuidanceError::OutputSchema {
            reason: e.to_string(),
            raw: candidate.to_string(),
        })?;

    validate_guidance(&parsed.guidance, limits).map_err(|reason| GuidanceError::OutputSchema {
        reason,
        raw: candidate.to_string(),
    })?;

    if parsed.matched_jobs.as_slice() != matches {
        debug!(
            "Model echoed {} jobs that differ from the {} supplied; using the supplied list",
            parsed.matched_jobs.len(),
            matches.len()
        );
    }

    info!(
        "Guidance generated: {} job titles, {} gap items, {} steps",
        parsed.guidance.potential_job_titles.len(),
        parsed.guidance.skills_gap.len(),
        parsed.guidance.actionable_steps.len()
    );

    Ok(GuidanceResult {
        guidance: parsed.guidance,
        matched_jobs: matches.to_vec(),
    })
}

/// Builds the single combined context: summary, skills, raw query and the full
/// matched-job list serialized losslessly.
fn build_guidance_prompt(
    profile: &CandidateProfile,
    query: &str,
    matches: &[MatchedJob],
    limits: &GuidanceLimits,
) -> String {
    let context = json!({
        "resume_summary": profile.summary,
        "user_extracted_skills": profile.skills,
        "user_query": query,
        "filtered_jobs_list": matches,
    });

    GUIDANCE_PROMPT_TEMPLATE
        .replace("{min_titles}", &limits.min_job_titles.to_string())
        .replace("{max_titles}", &limits.max_job_titles.to_string())
        .replace("{context_json}", &format!("{context:#}"))
}

/// Returns the largest brace-delimited span: first `{` through last `}`.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn validate_guidance(guidance: &CareerGuidance, limits: &GuidanceLimits) -> Result<(), String> {
    if guidance.career_path_suggestion.trim().is_empty() {
        return Err("career_path_suggestion is empty".to_string());
    }

    let titles = &guidance.potential_job_titles;
    if titles.len() < limits.min_job_titles || titles.len() > limits.max_job_titles {
        return Err(format!(
            "potential_job_titles has {} entries, expected {}-{}",
            titles.len(),
            limits.min_job_titles,
            limits.max_job_titles
        ));
    }
    if titles.iter().any(|t| t.trim().is_empty()) {
        return Err("potential_job_titles contains a blank title".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::catalog::JobCatalog;
    use crate::llm_client::testing::{unavailable, ScriptedGenerator};

    fn profile() -> CandidateProfile {
        CandidateProfile {
            skills: vec!["Python".to_string(), "SQL".to_string()],
            summary: "Analyst moving into data science.".to_string(),
        }
    }

    fn matches() -> Vec<MatchedJob> {
        JobCatalog::builtin().postings()[..2].to_vec()
    }

    fn guidance_json(titles: usize, jobs: serde_json::Value) -> String {
        let titles: Vec<String> = (1..=titles).map(|i| format!("Title {i}")).collect();
        json!({
            "guidance": {
                "career_path_suggestion": "Grow into a data scientist role.",
                "relevant_skills_gap": ["Deep Learning", "TensorFlow"],
                "actionable_steps": ["Complete a deep learning course", "Ship a Kaggle project"],
                "potential_job_titles": titles,
            },
            "matched_jobs": jobs,
        })
        .to_string()
    }

    #[test]
    fn test_extract_json_object_with_surrounding_prose() {
        let raw = "Thought: I now know the answer.\n{\"a\": {\"b\": 1}}\nHope this helps!";
        assert_eq!(extract_json_object(raw), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_object_absent() {
        assert_eq!(extract_json_object("no structured output here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[tokio::test]
    async fn test_valid_output_with_prose_is_accepted() {
        let body = guidance_json(6, serde_json::to_value(matches()).unwrap());
        let raw = format!("Here is your guidance:\n{body}\nGood luck!");
        let llm = ScriptedGenerator::new(vec![Ok(raw)]);

        let result = synthesize_guidance(
            &profile(),
            "best roles for me",
            &matches(),
            &llm,
            &GuidanceLimits::default(),
        )
        .await
        .unwrap();

        assert_eq!(result.guidance.potential_job_titles.len(), 6);
        assert_eq!(result.guidance.skills_gap, vec!["Deep Learning", "TensorFlow"]);
        assert_eq!(result.matched_jobs, matches());
    }

    #[tokio::test]
    async fn test_echoed_jobs_are_replaced_by_supplied_matches() {
        let tampered = json!([{
            "title": "Invented Job",
            "company": "Nowhere",
            "location": "Mars",
            "skills_required": ["Teleportation"],
            "description": "Not in the catalog."
        }]);
        let llm = ScriptedGenerator::new(vec![Ok(guidance_json(5, tampered))]);

        let supplied = matches();
        let result = synthesize_guidance(
            &profile(),
            "q",
            &supplied,
            &llm,
            &GuidanceLimits::default(),
        )
        .await
        .unwrap();

        assert_eq!(result.matched_jobs, supplied);
        assert_eq!(
            serde_json::to_vec(&result.matched_jobs).unwrap(),
            serde_json::to_vec(&supplied).unwrap()
        );
    }

    #[tokio::test]
    async fn test_prompt_carries_full_context() {
        let llm = ScriptedGenerator::new(vec![Ok(guidance_json(5, json!([])))]);
        synthesize_guidance(
            &profile(),
            "How do I become an ML engineer?",
            &matches(),
            &llm,
            &GuidanceLimits::default(),
        )
        .await
        .unwrap();

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        let (system, prompt, temperature) = &calls[0];
        assert!(system.contains("career advisor"));
        assert!(prompt.contains("How do I become an ML engineer?"));
        assert!(prompt.contains("Analyst moving into data science."));
        assert!(prompt.contains("Software Engineer (Backend)"));
        assert!(prompt.contains("between 5 and 10 job titles"));
        assert_eq!(*temperature, GUIDANCE_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_generation_failure_is_terminal() {
        let llm = ScriptedGenerator::new(vec![Err(unavailable())]);
        let result =
            synthesize_guidance(&profile(), "q", &[], &llm, &GuidanceLimits::default()).await;
        assert!(matches!(result, Err(GuidanceError::Generation(_))));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_no_json_is_output_format_error() {
        let llm = ScriptedGenerator::new(vec![Ok(
            "I'm sorry, I cannot help with that request.".to_string()
        )]);
        let result =
            synthesize_guidance(&profile(), "q", &[], &llm, &GuidanceLimits::default()).await;
        match result {
            Err(GuidanceError::OutputFormat { raw }) => assert!(raw.contains("cannot help")),
            other => panic!("expected OutputFormat, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_schema_error_with_raw_span() {
        let llm = ScriptedGenerator::new(vec![Ok(
            "Result: {\"guidance\": {\"career_path_suggestion\": \"x\",}} end".to_string(),
        )]);
        let result =
            synthesize_guidance(&profile(), "q", &[], &llm, &GuidanceLimits::default()).await;
        match result {
            Err(GuidanceError::OutputSchema { raw, .. }) => {
                assert!(raw.starts_with('{'));
                assert!(raw.ends_with('}'));
            }
            other => panic!("expected OutputSchema, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_matched_jobs_is_schema_error() {
        let raw = json!({
            "guidance": {
                "career_path_suggestion": "x",
                "relevant_skills_gap": [],
                "actionable_steps": [],
                "potential_job_titles": ["a", "b", "c", "d", "e"]
            }
        })
        .to_string();
        let llm = ScriptedGenerator::new(vec![Ok(raw)]);
        let result =
            synthesize_guidance(&profile(), "q", &[], &llm, &GuidanceLimits::default()).await;
        assert!(matches!(result, Err(GuidanceError::OutputSchema { .. })));
    }

    #[tokio::test]
    async fn test_too_few_job_titles_is_schema_error() {
        let llm = ScriptedGenerator::new(vec![Ok(guidance_json(2, json!([])))]);
        let result =
            synthesize_guidance(&profile(), "q", &[], &llm, &GuidanceLimits::default()).await;
        match result {
            Err(GuidanceError::OutputSchema { reason, .. }) => {
                assert!(reason.contains("potential_job_titles"))
            }
            other => panic!("expected OutputSchema, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_too_many_job_titles_is_schema_error() {
        let llm = ScriptedGenerator::new(vec![Ok(guidance_json(11, json!([])))]);
        let result =
            synthesize_guidance(&profile(), "q", &[], &llm, &GuidanceLimits::default()).await;
        assert!(matches!(result, Err(GuidanceError::OutputSchema { .. })));
    }

    #[tokio::test]
    async fn test_title_range_follows_limits() {
        let limits = GuidanceLimits {
            max_matched_jobs: 7,
            min_job_titles: 1,
            max_job_titles: 3,
        };
        let llm = ScriptedGenerator::new(vec![Ok(guidance_json(2, json!([])))]);
        let result = synthesize_guidance(&profile(), "q", &[], &llm, &limits).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let limits = GuidanceLimits::default();
        let mut guidance = CareerGuidance {
            career_path_suggestion: "  ".to_string(),
            skills_gap: vec![],
            actionable_steps: vec![],
            potential_job_titles: (0..5).map(|i| i.to_string()).collect(),
        };
        assert!(validate_guidance(&guidance, &limits).is_err());

        guidance.career_path_suggestion = "Data science".to_string();
        assert!(validate_guidance(&guidance, &limits).is_ok());

        guidance.potential_job_titles[2] = String::new();
        assert!(validate_guidance(&guidance, &limits).is_err());
    }
}
