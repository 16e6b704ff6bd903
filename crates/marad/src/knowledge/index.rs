//! TF-IDF vector index over problem texts.
//!
//! Vector space model with unigram+bigram terms, stopword removal,
//! smoothed idf, and l2-normalized document vectors scored by cosine
//! similarity. The index is immutable once fitted; callers rebuild it in
//! full when the corpus changes (acceptable while the corpus stays
//! small).

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Common English stopwords, excluded from the term space.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for",
        "of", "with", "by", "from", "as", "is", "was", "are", "were", "been",
        "be", "have", "has", "had", "do", "does", "did", "will", "would",
        "could", "should", "may", "might", "must", "shall", "can", "need",
        "it", "its", "this", "that", "these", "those", "we", "you", "i",
        "my", "your", "their", "our", "what", "which", "who", "when",
        "where", "why", "how", "not", "no", "so", "if", "then", "than",
        "about", "into", "all", "each", "some", "such", "only", "also",
        "both", "any",
    ]
    .iter()
    .copied()
    .collect()
});

/// Fitted TF-IDF index. An unfitted (default) index scores everything
/// as empty rather than erroring.
#[derive(Debug, Default)]
pub struct TfIdfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    doc_vectors: Vec<Vec<(usize, f64)>>,
}

impl TfIdfIndex {
    /// Fit an index over the given document texts.
    pub fn fit(documents: &[String]) -> Self {
        if documents.is_empty() {
            return Self::default();
        }

        let doc_terms: Vec<Vec<String>> = documents.iter().map(|d| terms(d)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for terms in &doc_terms {
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(term.clone()).or_insert(next_id);
                if id == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[id] += 1;
            }
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1.
        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let index = Self {
            vocabulary,
            idf,
            doc_vectors: Vec::new(),
        };
        let doc_vectors = doc_terms.iter().map(|t| index.vectorize(t)).collect();

        Self {
            doc_vectors,
            ..index
        }
    }

    pub fn len(&self) -> usize {
        self.doc_vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_vectors.is_empty()
    }

    /// Cosine similarity of the query against every indexed document,
    /// in document order. Empty when unfitted.
    pub fn score(&self, query: &str) -> Vec<f64> {
        if self.is_empty() {
            return Vec::new();
        }

        let query_vector = self.vectorize(&terms(query));
        self.doc_vectors
            .iter()
            .map(|doc| sparse_dot(&query_vector, doc))
            .collect()
    }

    /// l2-normalized sparse tf-idf vector over the fitted vocabulary;
    /// out-of-vocabulary terms are ignored.
    fn vectorize(&self, terms: &[String]) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms {
            if let Some(&id) = self.vocabulary.get(term) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut weighted: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .collect();
        weighted.sort_by_key(|(id, _)| *id);

        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in weighted.iter_mut() {
                *w /= norm;
            }
        }
        weighted
    }
}

/// Unigram + bigram terms after tokenization and stopword removal.
fn terms(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(t))
        .map(|t| t.to_string())
        .collect();

    let mut terms = tokens.clone();
    terms.extend(tokens.windows(2).map(|pair| pair.join(" ")));
    terms
}

/// Dot product of two sorted sparse vectors.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let mut dot = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn exact_text_scores_one() {
        let index = TfIdfIndex::fit(&docs(&[
            "solve quadratic equation x² + 5x + 6 = 0",
            "calculate area of triangle with sides 3, 4, 5",
        ]));

        let scores = index.score("solve quadratic equation x² + 5x + 6 = 0");
        assert_relative_eq!(scores[0], 1.0, epsilon = 1e-9);
        assert!(scores[1] < 0.5);
    }

    #[test]
    fn duplicate_documents_both_score_one() {
        let text = "find derivative of f(x) = 3x³ + 2x² - 5x + 1";
        let index = TfIdfIndex::fit(&docs(&[text, text]));

        let scores = index.score(text);
        assert_relative_eq!(scores[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(scores[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn unrelated_query_scores_zero() {
        let index = TfIdfIndex::fit(&docs(&["solve quadratic equation"]));
        let scores = index.score("baking sourdough bread");
        assert_relative_eq!(scores[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn unfitted_index_scores_nothing() {
        let index = TfIdfIndex::default();
        assert!(index.score("anything").is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn bigrams_reward_phrase_overlap() {
        let index = TfIdfIndex::fit(&docs(&[
            "standard deviation of a dataset",
            "standard library reference",
        ]));
        let scores = index.score("standard deviation");
        assert!(
            scores[0] > scores[1],
            "phrase match should outrank token match: {scores:?}"
        );
    }

    #[test]
    fn stopwords_do_not_contribute() {
        let index = TfIdfIndex::fit(&docs(&["the mean of the values"]));
        let with = index.score("the mean");
        let without = index.score("mean");
        assert_relative_eq!(with[0], without[0], epsilon = 1e-9);
    }
}
