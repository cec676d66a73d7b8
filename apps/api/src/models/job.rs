use serde::{Deserialize, Serialize};

/// One entry of the reference job catalog.
/// `required_skills` is compared case-insensitively by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "skills_required")]
    pub required_skills: Vec<String>,
    pub description: String,
}

/// A catalog posting selected for the current candidate.
pub type MatchedJob = JobPosting;
