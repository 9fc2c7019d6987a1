use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder scanned for `.docx` question documents.
    pub docx_folder: String,
    /// Base URL of the remote object store.
    pub store_base_url: String,
    /// API key sent with every store request.
    pub store_api_key: String,
    /// Default countdown for newly imported subjects, in minutes.
    pub default_time_limit_minutes: u64,
    /// Default sample size for newly imported subjects (clamped to bank size).
    pub default_question_count: usize,
    /// Output file for the results report.
    pub report_file: String,
    /// Whether to log per-question import details.
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docx_folder: "question_docs".to_string(),
            store_base_url: "http://localhost:8000".to_string(),
            store_api_key: String::new(),
            default_time_limit_minutes: 30,
            default_question_count: 20,
            report_file: "results_report.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            docx_folder: std::env::var("DOCX_FOLDER").unwrap_or(default.docx_folder),
            store_base_url: std::env::var("STORE_BASE_URL").unwrap_or(default.store_base_url),
            store_api_key: std::env::var("STORE_API_KEY").unwrap_or(default.store_api_key),
            default_time_limit_minutes: std::env::var("DEFAULT_TIME_LIMIT_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.default_time_limit_minutes),
            default_question_count: std::env::var("DEFAULT_QUESTION_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.default_question_count),
            report_file: std::env::var("REPORT_FILE").unwrap_or(default.report_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }

    /// Load configuration from a TOML file. Missing keys fall back to the
    /// defaults.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Other(format!("bad config file: {}", e)))
    }
}
