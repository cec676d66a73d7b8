use serde::{Deserialize, Deserializer, Serialize};

use crate::models::job::MatchedJob;

/// Career advice produced by the guidance stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerGuidance {
    pub career_path_suggestion: String,
    #[serde(
        rename = "relevant_skills_gap",
        alias = "skills_gap",
        deserialize_with = "string_or_list"
    )]
    pub skills_gap: Vec<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub actionable_steps: Vec<String>,
    pub potential_job_titles: Vec<String>,
}

/// The sole success artifact of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceResult {
    pub guidance: CareerGuidance,
    pub matched_jobs: Vec<MatchedJob>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    Text(String),
    List(Vec<String>),
}

/// Accepts either a JSON array of strings or a single string, which is split
/// into its non-blank lines.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::List(items) => items,
        StringOrList::Text(text) => text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_career_guidance_accepts_lists() {
        let json = r#"{
            "career_path_suggestion": "Move towards data engineering.",
            "relevant_skills_gap": ["Spark", "Airflow"],
            "actionable_steps": ["Build a pipeline project"],
            "potential_job_titles": ["Data Engineer"]
        }"#;
        let guidance: CareerGuidance = serde_json::from_str(json).unwrap();
        assert_eq!(guidance.skills_gap, vec!["Spark", "Airflow"]);
        assert_eq!(guidance.actionable_steps.len(), 1);
    }

    #[test]
    fn test_career_guidance_splits_string_fields_into_lines() {
        let json = r#"{
            "career_path_suggestion": "x",
            "relevant_skills_gap": "Spark\n\n  Airflow  \n",
            "actionable_steps": "Take a course",
            "potential_job_titles": []
        }"#;
        let guidance: CareerGuidance = serde_json::from_str(json).unwrap();
        assert_eq!(guidance.skills_gap, vec!["Spark", "Airflow"]);
        assert_eq!(guidance.actionable_steps, vec!["Take a course"]);
    }

    #[test]
    fn test_career_guidance_accepts_skills_gap_alias() {
        let json = r#"{
            "career_path_suggestion": "x",
            "skills_gap": ["Go"],
            "actionable_steps": [],
            "potential_job_titles": []
        }"#;
        let guidance: CareerGuidance = serde_json::from_str(json).unwrap();
        assert_eq!(guidance.skills_gap, vec!["Go"]);
    }

    #[test]
    fn test_career_guidance_missing_field_fails() {
        let json = r#"{
            "career_path_suggestion": "x",
            "relevant_skills_gap": [],
            "potential_job_titles": []
        }"#;
        assert!(serde_json::from_str::<CareerGuidance>(json).is_err());
    }

    #[test]
    fn test_career_guidance_rejects_non_string_items() {
        let json = r#"{
            "career_path_suggestion": "x",
            "relevant_skills_gap": [1, 2],
            "actionable_steps": [],
            "potential_job_titles": []
        }"#;
        assert!(serde_json::from_str::<CareerGuidance>(json).is_err());
    }
}
