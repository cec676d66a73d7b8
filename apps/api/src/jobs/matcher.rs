//! Job Matcher — selects catalog postings that share at least one skill with the candidate.
//!
//! Algorithm:
//! 1. Lower-case the candidate's skills into a set.
//! 2. Walk the catalog in order; keep a posting iff its lower-cased
//!    required skills intersect the candidate set (one shared skill is enough).
//! 3. Truncate to `limit` after filtering. Catalog order is never re-ranked.

use std::collections::HashSet;

use crate::models::job::{JobPosting, MatchedJob};
use crate::models::profile::CandidateProfile;

pub fn match_jobs(
    profile: &CandidateProfile,
    catalog: &[JobPosting],
    limit: usize,
) -> Vec<MatchedJob> {
    let candidate: HashSet<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();

    if candidate.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|posting| {
            posting
                .required_skills
                .iter()
                .any(|skill| candidate.contains(&skill.to_lowercase()))
        })
        .take(limit)
        .cloned()
        .collect()
}
