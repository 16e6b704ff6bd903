//! Structured step-by-step derivations.
//!
//! Every solving strategy, the knowledge base, and the web synthesizer
//! all emit the same `Solution` shape: a contiguous 1-based step list
//! plus a non-empty final answer. `is_well_formed` checks exactly that
//! invariant and is asserted across the test suites.

use serde::{Deserialize, Serialize};

/// One titled, explained unit of a derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position in the derivation, contiguous.
    #[serde(rename = "step")]
    pub index: u32,
    pub title: String,
    /// The mathematical content of the step (expression, computation).
    pub content: String,
    /// Why this step is valid.
    pub explanation: String,
}

impl Step {
    pub fn new(
        index: u32,
        title: impl Into<String>,
        content: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            index,
            title: title.into(),
            content: content.into(),
            explanation: explanation.into(),
        }
    }
}

/// External reference backing a web-derived solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

/// A full derivation with provenance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub steps: Vec<Step>,
    pub final_answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl Solution {
    pub fn new(steps: Vec<Step>, final_answer: impl Into<String>) -> Self {
        Self {
            steps,
            final_answer: final_answer.into(),
            sources: Vec::new(),
            confidence_score: None,
        }
    }

    pub fn with_sources(mut self, sources: Vec<SourceRef>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence_score = Some(confidence);
        self
    }

    /// Steps are non-empty and numbered 1..=n; the final answer is
    /// non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.steps.is_empty()
            && !self.final_answer.trim().is_empty()
            && self
                .steps
                .iter()
                .enumerate()
                .all(|(i, s)| s.index == i as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(i: u32) -> Step {
        Step::new(i, "t", "c", "e")
    }

    #[test]
    fn well_formed_requires_contiguous_steps() {
        let ok = Solution::new(vec![step(1), step(2)], "x = 1");
        assert!(ok.is_well_formed());

        let gap = Solution::new(vec![step(1), step(3)], "x = 1");
        assert!(!gap.is_well_formed());

        let empty_steps = Solution::new(vec![], "x = 1");
        assert!(!empty_steps.is_well_formed());

        let empty_answer = Solution::new(vec![step(1)], "  ");
        assert!(!empty_answer.is_well_formed());
    }

    #[test]
    fn serializes_step_index_as_step() {
        let s = Solution::new(vec![step(1)], "done").with_confidence(0.95);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["steps"][0]["step"], 1);
        assert_eq!(json["confidence_score"], 0.95);
        // Empty sources are omitted from the wire form.
        assert!(json.get("sources").is_none());
    }
}
