use std::sync::Arc;

use crate::config::Config;
use crate::jobs::catalog::JobCatalog;
use crate::llm_client::TextGenerator;
use crate::resume::extractor::DocumentExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text-generation backend. Default: `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Document extractor. Default: `PdfExtractor`.
    pub extractor: Arc<dyn DocumentExtractor>,
    /// Read-only reference catalog, loaded once at startup.
    pub catalog: Arc<JobCatalog>,
    pub config: Config,
}

#[cfg(test)]
pub mod testing {
    use std::path::Path;

    use super::*;
    use crate::config::{GuidanceLimits, LlmConfig};

    pub fn test_config(upload_dir: &Path) -> Config {
        Config {
            llm: LlmConfig {
                api_key: "test-key".to_string(),
                base_url: "http://localhost:9".to_string(),
                model: "test-model".to_string(),
                timeout_secs: 5,
                max_retries: 0,
            },
            port: 0,
            rust_log: "debug".to_string(),
            job_catalog_path: None,
            upload_dir: upload_dir.to_path_buf(),
            request_timeout_secs: 30,
            max_upload_bytes: 1024 * 1024,
            limits: GuidanceLimits::default(),
            cors_allowed_origins: vec![],
        }
    }

    pub fn test_state(
        llm: Arc<dyn TextGenerator>,
        extractor: Arc<dyn DocumentExtractor>,
        catalog: JobCatalog,
        upload_dir: &Path,
    ) -> AppState {
        AppState {
            llm,
            extractor,
            catalog: Arc::new(catalog),
            config: test_config(upload_dir),
        }
    }
}
