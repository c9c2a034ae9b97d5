use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Unauthenticated requests work, just with a 60 req/hr quota
        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let api_base_url = env::var("GITHUB_API_URL")
            .ok()
            .map(|v| v.trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let concurrency_limit = env::var("CONCURRENCY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(6);

        if concurrency_limit == 0 {
            return Err(Error::Config(
                "CONCURRENCY_LIMIT must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            github_token,
            api_base_url,
            concurrency_limit,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: DEFAULT_API_URL.to_string(),
            concurrency_limit: 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub concurrency_limit: usize,
    pub max_events: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 6,
            max_events: 100,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
            ..Self::default()
        }
    }
}
