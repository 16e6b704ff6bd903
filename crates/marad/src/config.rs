//! Runtime configuration, read once from the environment and injected
//! at construction time.

use std::env;
use std::time::Duration;

/// Default acceptance threshold for retrieval hits.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// How many retrieval candidates to consider per request.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 3;

/// Bound on each outbound search provider call.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Credentials and limits for the outbound search providers.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub tavily_api_key: Option<String>,
    pub exa_api_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: None,
            exa_api_key: None,
            serper_api_key: None,
            timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let timeout_secs = env::var("MARA_SEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS);

        Self {
            tavily_api_key: non_empty(env::var("TAVILY_API_KEY").ok()),
            exa_api_key: non_empty(env::var("EXA_API_KEY").ok()),
            serper_api_key: non_empty(env::var("SERPER_API_KEY").ok()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Whether any provider credential is configured.
    pub fn has_credentials(&self) -> bool {
        self.tavily_api_key.is_some() || self.exa_api_key.is_some() || self.serper_api_key.is_some()
    }
}

/// Orchestrator policy knobs.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Retrieval hits at or below this similarity are not trusted.
    pub similarity_threshold: f64,
    pub retrieval_limit: usize,
    pub search: SearchConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            search: SearchConfig::default(),
        }
    }
}

impl RouterConfig {
    pub fn from_env() -> Self {
        let similarity_threshold = env::var("MARA_SIMILARITY_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SIMILARITY_THRESHOLD);

        Self {
            similarity_threshold,
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            search: SearchConfig::from_env(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let cfg = RouterConfig::default();
        assert_eq!(cfg.similarity_threshold, DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(cfg.retrieval_limit, 3);
        assert!(!cfg.search.has_credentials());
    }
}
