//! Skill & Summary Synthesizer — builds a `CandidateProfile` from résumé text.
//!
//! Primary path: one generation call returning `{"skills": [...], "summary": "..."}`.
//! Fallback path: whole-word keyword scan against `FALLBACK_VOCABULARY`. Taken when
//! the call fails, the reply is not JSON, or a required field is missing.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, GenerationRequest, ResponseFormat, TextGenerator};
use crate::models::profile::{CandidateProfile, ExtractedText};
use crate::resume::prompts::{PROFILE_EXTRACT_PROMPT, PROFILE_EXTRACT_SYSTEM};

/// Summary used whenever the profile came from the keyword fallback.
pub const DEGRADED_SUMMARY: &str =
    "Summary unavailable: skills were extracted by keyword matching because AI extraction failed.";

const EXTRACTION_TEMPERATURE: f32 = 0.0;

/// Reference vocabulary for the keyword fallback. Canonical spellings are what
/// the profile reports. Includes every skill of the built-in job catalog.
pub const FALLBACK_VOCABULARY: &[&str] = &[
    // Languages
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "Rust",
    "Golang",
    "C++",
    "C#",
    "R",
    "SQL",
    "HTML",
    "CSS",
    // Frameworks & tools
    "React",
    "Node.js",
    "TensorFlow",
    "PyTorch",
    "Spark",
    "Git",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "Jenkins",
    "Linux",
    "CI/CD",
    "Excel",
    "Tableau",
    "PostgreSQL",
    "MongoDB",
    "APIs",
    "Microservices",
    // Cloud
    "AWS",
    "Azure",
    "GCP",
    "Cloud Computing",
    "Cloud Security",
    // Data & ML
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "MLOps",
    "Model Deployment",
    "Data Analysis",
    "Data Modeling",
    "Data Visualization",
    "Statistics",
    "Statistical Analysis",
    "Time Series Analysis",
    "Financial Modeling",
    "Optimization",
    "Simulation",
    "Decision Science",
    "AI/ML Concepts",
    // Business & product
    "Product Management",
    "Project Management",
    "Market Research",
    "Roadmapping",
    "Solution Design",
    "Business Process Mapping",
    "Stakeholder Management",
    "Agile",
    "Scrum",
    // Soft skills
    "Communication",
    "Leadership",
    "Teamwork",
    "Problem Solving",
];

static VOCABULARY_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    FALLBACK_VOCABULARY
        .iter()
        .map(|skill| {
            let re = Regex::new(&vocabulary_pattern(skill))
                .expect("vocabulary pattern is a valid regex");
            (*skill, re)
        })
        .collect()
});

/// Whole-word pattern for one vocabulary term.
///
/// Single-letter language names are case-sensitive. "R" additionally needs a
/// list delimiter or a language word after it, so initials and "R&D" stay out.
fn vocabulary_pattern(skill: &str) -> String {
    match skill {
        "R" => concat!(
            r"(?m)(?:^|[\s,;:(/])R",
            r"(?:[ \t]*(?:[,;/|)\r]|$)|[ \t]+(?i:programming|language|studio)\b)"
        )
        .to_string(),
        "C#" | "C++" => format!(
            r"(?:^|[^\p{{L}}\p{{N}}_]){}(?:$|[^\p{{L}}\p{{N}}_])",
            regex::escape(skill)
        ),
        _ => format!(
            r"(?i)(?:^|[^\p{{L}}\p{{N}}_]){}(?:$|[^\p{{L}}\p{{N}}_])",
            regex::escape(skill)
        ),
    }
}

/// Which path produced the profile. `Fallback` is a partial success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ProfileOutcome {
    pub profile: CandidateProfile,
    pub source: ProfileSource,
}

#[derive(Debug, Deserialize)]
struct GeneratedProfile {
    skills: Vec<String>,
    summary: String,
}

/// Builds the candidate profile. Never fails: any problem with the generation
/// call degrades to `fallback_profile`.
pub async fn synthesize_profile(text: &ExtractedText, llm: &dyn TextGenerator) -> ProfileOutcome {
    let system = format!("{PROFILE_EXTRACT_SYSTEM} {JSON_ONLY_INSTRUCTION}");
    let prompt = PROFILE_EXTRACT_PROMPT.replace("{resume_text}", text.as_str());

    let reply = llm
        .generate(GenerationRequest {
            system: &system,
            prompt: &prompt,
            response_format: ResponseFormat::JsonObject,
            temperature: EXTRACTION_TEMPERATURE,
        })
        .await;

    let parsed = match reply {
        Ok(raw) => serde_json::from_str::<GeneratedProfile>(strip_json_fences(&raw))
            .map_err(|e| format!("unusable profile JSON: {e}")),
        Err(e) => Err(format!("generation call failed: {e}")),
    };

    match parsed {
        Ok(generated) => {
            let profile = CandidateProfile {
                skills: dedup_preserving_order(generated.skills),
                summary: generated.summary,
            };
            info!(
                "Profile extracted by generation: {} skills, summary {} chars",
                profile.skills.len(),
                profile.summary.len()
            );
            ProfileOutcome {
                profile,
                source: ProfileSource::Generated,
            }
        }
        Err(reason) => {
            warn!("Falling back to keyword skill extraction: {reason}");
            let profile = fallback_profile(text);
            info!(
                "Profile extracted by keyword fallback: {} skills",
                profile.skills.len()
            );
            ProfileOutcome {
                profile,
                source: ProfileSource::Fallback,
            }
        }
    }
}

/// Deterministic keyword extraction: vocabulary skills present in `text`,
/// sorted and unique, with the degraded summary sentinel.
pub fn fallback_profile(text: &ExtractedText) -> CandidateProfile {
    let found: BTreeSet<&str> = VOCABULARY_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text.as_str()))
        .map(|(skill, _)| *skill)
        .collect();

    CandidateProfile {
        skills: found.into_iter().map(String::from).collect(),
        summary: DEGRADED_SUMMARY.to_string(),
    }
}

/// Case-sensitive dedup that keeps the first occurrence.
fn dedup_preserving_order(skills: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
