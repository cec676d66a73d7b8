use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::models::job::JobPosting;

/// Static, ordered set of job postings shared read-only by all requests.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    postings: Vec<JobPosting>,
}

impl JobCatalog {
    pub fn new(postings: Vec<JobPosting>) -> Self {
        Self { postings }
    }

    /// Loads the catalog from `path` (a JSON array of postings) or, when no
    /// path is configured, returns the built-in reference catalog.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            let catalog = Self::builtin();
            info!("Using built-in job catalog ({} postings)", catalog.len());
            return Ok(catalog);
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job catalog {}", path.display()))?;
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("Invalid job catalog {}", path.display()))?;
        info!(
            "Loaded job catalog from {} ({} postings)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let postings: Vec<JobPosting> = serde_json::from_str(raw)?;
        if postings.is_empty() {
            bail!("job catalog contains no postings");
        }
        Ok(Self::new(postings))
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// The reference postings used when no catalog file is configured.
    pub fn builtin() -> Self {
        Self::new(vec![
            posting(
                "Data Scientist",
                "Tech Innovations",
                "Remote",
                &["Python", "Machine Learning", "SQL", "Deep Learning", "TensorFlow"],
                "Develop and deploy machine learning models to solve complex business problems.",
            ),
            posting(
                "Software Engineer (Backend)",
                "Global Solutions",
                "Hyderabad",
                &["Python", "Java", "APIs", "Microservices", "AWS"],
                "Design and implement scalable backend services for large-scale applications.",
            ),
            posting(
                "Cloud Architect",
                "Cloud Builders",
                "Bangalore",
                &["AWS", "Azure", "Cloud Security", "Terraform", "Solution Design"],
                "Design and implement secure and scalable cloud infrastructure.",
            ),
            posting(
                "DevOps Engineer",
                "CI/CD Masters",
                "Pune",
                &["Linux", "Docker", "Kubernetes", "CI/CD", "Ansible", "Jenkins"],
                "Automate deployment pipelines and manage infrastructure as code.",
            ),
            posting(
                "Business Analyst",
                "Consulting Group",
                "Mumbai",
                &["SQL", "Data Modeling", "Business Process Mapping", "Stakeholder Management"],
                "Analyze business needs and propose solutions.",
            ),
            posting(
                "Machine Learning Engineer",
                "AI Driven Inc.",
                "Seattle",
                &["Python", "TensorFlow", "PyTorch", "MLOps", "Model Deployment"],
                "Build, optimize, and deploy machine learning models into production environments.",
            ),
            posting(
                "Data Analyst",
                "Insightful Analytics",
                "Chennai",
                &["SQL", "Excel", "Tableau", "Data Visualization", "Statistical Analysis"],
                "Extract, clean, and analyze data to provide actionable business insights.",
            ),
            posting(
                "Product Manager (AI/ML)",
                "Future Tech",
                "San Francisco",
                &["Product Management", "AI/ML Concepts", "Market Research", "Roadmapping"],
                "Define and launch AI/ML products that meet market needs and business goals.",
            ),
            posting(
                "Operations Research Analyst",
                "Supply Chain Solutions",
                "Atlanta",
                &["Python", "Optimization", "Statistics", "Simulation", "Decision Science"],
                "Apply mathematical modeling and optimization techniques to improve operational efficiency.",
            ),
            posting(
                "Quantitative Analyst",
                "Fintech Innovations",
                "New York",
                &["Python", "R", "Statistics", "Financial Modeling", "Time Series Analysis"],
                "Develop quantitative models for financial markets and risk management.",
            ),
        ])
    }
}

fn posting(
    title: &str,
    company: &str,
    location: &str,
    skills: &[&str],
    description: &str,
) -> JobPosting {
    JobPosting {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
    }
}
