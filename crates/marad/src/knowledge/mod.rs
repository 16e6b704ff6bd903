//! Knowledge retrieval over a curated corpus of worked problems.
//!
//! Entries are immutable once indexed. Insertion rebuilds the TF-IDF
//! index in full while holding the write lock, so concurrent searches
//! never observe a half-built vocabulary. Searches reflect every
//! previously added entry.

pub mod index;
pub mod seed;

use index::TfIdfIndex;
use mara_shared::{Category, Solution};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// Fixed vocabulary for display/diagnostic keywords, independent of the
/// similarity scoring.
const MATH_TERMS: &[&str] = &[
    "solve", "find", "calculate", "compute", "determine",
    "equation", "derivative", "integral", "limit",
    "triangle", "circle", "area", "volume", "angle",
    "matrix", "vector", "system", "polynomial",
];

/// A (problem text, solution, category, keywords) tuple in the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub text: String,
    pub solution: Solution,
    pub category: Category,
    pub keywords: Vec<String>,
}

/// A ranked retrieval result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub text: String,
    pub solution: Solution,
    pub category: Category,
    pub similarity: f64,
    pub keywords: Vec<String>,
}

#[derive(Default)]
struct Inner {
    entries: Vec<KnowledgeEntry>,
    index: TfIdfIndex,
}

/// The shared retrieval corpus, injected by handle into the
/// orchestrator.
#[derive(Default)]
pub struct KnowledgeBase {
    inner: RwLock<Inner>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// A knowledge base pre-loaded with the curated worked problems.
    pub async fn seeded() -> Self {
        let kb = Self::new();
        for (text, solution, category) in seed::entries() {
            kb.add_entry(text, solution, category).await;
        }
        let count = kb.len().await;
        info!(entries = count, "knowledge base seeded");
        kb
    }

    /// Index a new entry. Rebuilds the index under the write lock.
    pub async fn add_entry(&self, text: &str, solution: Solution, category: Category) {
        let mut inner = self.inner.write().await;
        inner.entries.push(KnowledgeEntry {
            text: text.to_lowercase(),
            solution,
            category,
            keywords: extract_keywords(text),
        });
        let texts: Vec<String> = inner.entries.iter().map(|e| e.text.clone()).collect();
        inner.index = TfIdfIndex::fit(&texts);
    }

    /// Rank entries by cosine similarity to the query. Results below
    /// `min_similarity` are dropped; survivors are sorted descending and
    /// truncated to `limit`. An empty corpus returns an empty list.
    pub async fn search(&self, query: &str, limit: usize, min_similarity: f64) -> Vec<RetrievalHit> {
        let inner = self.inner.read().await;
        let scores = inner.index.score(&query.to_lowercase());

        let mut hits: Vec<RetrievalHit> = inner
            .entries
            .iter()
            .zip(scores)
            .filter(|(_, similarity)| *similarity >= min_similarity)
            .map(|(entry, similarity)| RetrievalHit {
                text: entry.text.clone(),
                solution: entry.solution.clone(),
                category: entry.category,
                similarity,
                keywords: entry.keywords.clone(),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);
        hits
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Scan for fixed-vocabulary mathematical terms.
fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    MATH_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect()
}
