use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Query used when the caller omits `user_query` or sends it blank.
pub const DEFAULT_USER_QUERY: &str =
    "Tell me about job opportunities related to my skills and advice on career progression.";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub port: u16,
    pub rust_log: String,
    pub job_catalog_path: Option<PathBuf>,
    pub upload_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub limits: GuidanceLimits,
    /// Empty means permissive CORS.
    pub cors_allowed_origins: Vec<String>,
}

/// Connection settings for the text-generation service.
/// Passed explicitly into `LlmClient`; nothing reads these from the environment later.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

/// Sizing knobs for the matcher and guidance validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidanceLimits {
    pub max_matched_jobs: usize,
    pub min_job_titles: usize,
    pub max_job_titles: usize,
}

impl Default for GuidanceLimits {
    fn default() -> Self {
        Self {
            max_matched_jobs: 7,
            min_job_titles: 5,
            max_job_titles: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = GuidanceLimits::default();
        let limits = GuidanceLimits {
            max_matched_jobs: env_or("MAX_MATCHED_JOBS", defaults.max_matched_jobs)?,
            min_job_titles: env_or("MIN_JOB_TITLES", defaults.min_job_titles)?,
            max_job_titles: env_or("MAX_JOB_TITLES", defaults.max_job_titles)?,
        };
        if limits.min_job_titles == 0 || limits.min_job_titles > limits.max_job_titles {
            bail!(
                "MIN_JOB_TITLES ({}) must be between 1 and MAX_JOB_TITLES ({})",
                limits.min_job_titles,
                limits.max_job_titles
            );
        }

        Ok(Config {
            llm: LlmConfig {
                api_key: require_env("LLM_API_KEY")?,
                base_url: std::env::var("LLM_BASE_URL")
                    .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
                model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "llama3-8b-8192".to_string()),
                timeout_secs: env_or("LLM_TIMEOUT_SECS", 120)?,
                max_retries: env_or("LLM_MAX_RETRIES", 0)?,
            },
            port: env_or("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            job_catalog_path: std::env::var("JOB_CATALOG_PATH").ok().map(PathBuf::from),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 300)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            limits,
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins(" http://localhost:8501, ,http://127.0.0.1:8501,");
        assert_eq!(
            origins,
            vec!["http://localhost:8501", "http://127.0.0.1:8501"]
        );
    }

    #[test]
    fn test_default_limits_match_reference_values() {
        let limits = GuidanceLimits::default();
        assert_eq!(limits.max_matched_jobs, 7);
        assert_eq!(limits.min_job_titles, 5);
        assert_eq!(limits.max_job_titles, 10);
    }

    #[test]
    fn test_env_or_uses_default_when_unset() {
        let value: u64 = env_or("CAREERPATH_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
