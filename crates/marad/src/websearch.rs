//! Web search fallback and snippet-to-solution synthesis.
//!
//! Providers are tried in a fixed preference order (Tavily, then Exa,
//! then Serper), using whichever credentials are configured. A provider
//! error or timeout falls through to the next provider within the same
//! request. Absent credentials, or when every provider fails, a small
//! fixed set of placeholder snippets is returned, flagged so downstream
//! consumers can tell it apart from real search results.

use crate::config::SearchConfig;
use mara_shared::{Solution, SourceRef, Step};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Confidence assigned when no snippet carries a relevance signal.
const NO_RESULT_CONFIDENCE: f64 = 0.3;

/// Cues indicating the snippets describe an actual solving procedure.
const PROCEDURE_CUES: &[&str] = &["solve", "equation", "derivative", "integral", "formula"];

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// One ranked result snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    pub title: String,
    pub content: String,
    pub url: String,
    pub relevance: f64,
}

/// Whether results came from a live provider or the canned fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Live,
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Tavily,
    Exa,
    Serper,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Provider::Tavily => "tavily",
            Provider::Exa => "exa",
            Provider::Serper => "serper",
        };
        write!(f, "{}", s)
    }
}

/// Result of one search request, carrying provenance.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub snippets: Vec<Snippet>,
    pub provider: Option<Provider>,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: String,
    #[serde(default = "default_relevance")]
    score: f64,
}

#[derive(Deserialize)]
struct ExaResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Deserialize)]
struct ExaResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    url: String,
    #[serde(default = "default_relevance")]
    score: f64,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Deserialize)]
struct SerperResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

fn default_relevance() -> f64 {
    0.5
}

/// Outbound search client with bounded timeouts.
pub struct WebSearch {
    http: reqwest::Client,
    config: SearchConfig,
}

impl WebSearch {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("mara/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Credential status for the status surface.
    pub fn credential_status(&self) -> &'static str {
        if self.config.has_credentials() {
            "connected"
        } else {
            "no_api_key"
        }
    }

    /// Search for mathematical content. Never fails: provider errors
    /// fall through to the next provider and ultimately to placeholder
    /// snippets.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let providers: [(Provider, Option<&String>); 3] = [
            (Provider::Tavily, self.config.tavily_api_key.as_ref()),
            (Provider::Exa, self.config.exa_api_key.as_ref()),
            (Provider::Serper, self.config.serper_api_key.as_ref()),
        ];

        for (provider, key) in providers {
            let Some(key) = key else { continue };
            let attempt = match provider {
                Provider::Tavily => self.search_tavily(query, key).await,
                Provider::Exa => self.search_exa(query, key).await,
                Provider::Serper => self.search_serper(query, key).await,
            };
            match attempt {
                // A successful call ends the chain even with zero
                // results; only failed attempts fall through.
                Ok(snippets) => {
                    debug!(%provider, results = snippets.len(), "web search succeeded");
                    return SearchOutcome {
                        status: SearchStatus::Live,
                        snippets,
                        provider: Some(provider),
                    };
                }
                Err(e) => {
                    warn!(%provider, error = %e, "provider failed, falling through");
                }
            }
        }

        SearchOutcome {
            status: SearchStatus::Placeholder,
            snippets: placeholder_snippets(query),
            provider: None,
        }
    }

    async fn search_tavily(&self, query: &str, key: &str) -> Result<Vec<Snippet>, SearchError> {
        let payload = serde_json::json!({
            "query": format!("mathematics {} step by step solution", query),
            "search_depth": "advanced",
            "include_answer": true,
            "max_results": 5,
            "include_domains": [
                "mathworld.wolfram.com",
                "khanacademy.org",
                "math.stackexchange.com",
                "brilliant.org",
                "mit.edu",
                "stanford.edu",
            ],
        });

        let response: TavilyResponse = self
            .post_json("https://api.tavily.com/search", &payload, |req| {
                req.bearer_auth(key)
            })
            .await?;

        Ok(response
            .results
            .into_iter()
            .map(|r| Snippet {
                title: r.title,
                content: r.content,
                url: r.url,
                relevance: r.score,
            })
            .collect())
    }

    async fn search_exa(&self, query: &str, key: &str) -> Result<Vec<Snippet>, SearchError> {
        let payload = serde_json::json!({
            "query": format!("mathematics {}", query),
            "type": "keyword",
            "numResults": 5,
            "contents": { "text": true },
        });

        let response: ExaResponse = self
            .post_json("https://api.exa.ai/search", &payload, |req| {
                req.header("Authorization", format!("Bearer {}", key))
            })
            .await?;

        Ok(response
            .results
            .into_iter()
            .map(|r| Snippet {
                title: r.title,
                content: r.text,
                url: r.url,
                relevance: r.score,
            })
            .collect())
    }

    async fn search_serper(&self, query: &str, key: &str) -> Result<Vec<Snippet>, SearchError> {
        let payload = serde_json::json!({
            "q": format!("mathematics {} step by step solution", query),
            "num": 5,
        });

        let response: SerperResponse = self
            .post_json("https://google.serper.dev/search", &payload, |req| {
                req.header("X-API-KEY", key)
            })
            .await?;

        Ok(response
            .organic
            .into_iter()
            .map(|r| Snippet {
                title: r.title,
                content: r.snippet,
                url: r.link,
                relevance: 0.7,
            })
            .collect())
    }

    async fn post_json<T, F>(
        &self,
        url: &str,
        payload: &serde_json::Value,
        auth: F,
    ) -> Result<T, SearchError>
    where
        T: serde::de::DeserializeOwned,
        F: FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
    {
        let response = auth(self.http.post(url).json(payload))
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Network(format!("HTTP {}", response.status())));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}

/// Canned snippets standing in for real search. Clearly plausible-only;
/// callers must branch on `SearchStatus::Placeholder`.
fn placeholder_snippets(query: &str) -> Vec<Snippet> {
    vec![
        Snippet {
            title: "Advanced Mathematical Concepts - MIT OpenCourseWare".to_string(),
            content: format!(
                "This query '{}' involves advanced mathematical concepts that require \
                 specialized knowledge. The solution typically involves multiple steps \
                 using established mathematical principles and theorems.",
                query
            ),
            url: "https://ocw.mit.edu/mathematics".to_string(),
            relevance: 0.85,
        },
        Snippet {
            title: "Mathematical Problem Solving - Khan Academy".to_string(),
            content: format!(
                "Step-by-step approach to solving mathematical problems like '{}'. The \
                 methodology involves identifying the problem type, applying relevant \
                 formulas, and verifying the solution.",
                query
            ),
            url: "https://khanacademy.org/math".to_string(),
            relevance: 0.78,
        },
    ]
}

/// Turn ranked snippets into a structured solution. With no snippets at
/// all, a single advanced-topic step is emitted. The query itself is
/// already embedded in the snippet contents by the providers.
pub fn synthesize(_query: &str, snippets: &[Snippet]) -> Solution {
    if snippets.is_empty() {
        let steps = vec![Step::new(
            1,
            "Advanced Topic Identified",
            "This appears to be an advanced mathematical topic",
            "The problem requires specialized knowledge not available in our \
             knowledge base",
        )];
        return Solution::new(
            steps,
            "Please consult specialized mathematical literature or provide more \
             specific details",
        )
        .with_confidence(NO_RESULT_CONFIDENCE);
    }

    let combined: String = snippets
        .iter()
        .take(2)
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let lead: String = combined.chars().take(200).collect();

    let mut steps = vec![
        Step::new(
            1,
            "Problem Analysis",
            format!("Based on current mathematical research: {}...", lead),
            "Analysis from leading mathematical resources and academic sources",
        ),
        Step::new(
            2,
            "Solution Approach",
            "This problem requires advanced mathematical techniques",
            "The solution involves principles found in specialized mathematical \
             literature",
        ),
    ];

    let combined_lower = combined.to_lowercase();
    if PROCEDURE_CUES.iter().any(|cue| combined_lower.contains(cue)) {
        steps.push(Step::new(
            3,
            "Mathematical Method",
            "Apply the relevant mathematical method as described in the sources",
            "Follow the step-by-step procedure outlined in the mathematical \
             literature",
        ));
    }

    let confidence = snippets
        .iter()
        .map(|s| s.relevance)
        .fold(f64::MIN, f64::max);
    let sources = snippets
        .iter()
        .take(3)
        .map(|s| SourceRef {
            title: s.title.clone(),
            url: s.url.clone(),
        })
        .collect();

    Solution::new(
        steps,
        "This is an advanced mathematical topic. For detailed solutions, please \
         consult the provided sources or seek specialized assistance.",
    )
    .with_sources(sources)
    .with_confidence(confidence)
}
