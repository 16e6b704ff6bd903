//! Rule-based feedback learning sink.
//!
//! Fire-and-forget from the orchestrator: each feedback submission is
//! analyzed into concrete improvement suggestions, retained per problem
//! id for later inspection. No return value feeds back into the solve
//! pipeline.

use chrono::{DateTime, Utc};
use mara_shared::ClarityRating;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Outcome of analyzing one feedback submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackAnalysis {
    pub problem_id: Uuid,
    pub suggestions: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// Retains analyses keyed by problem id; newest wins.
#[derive(Default)]
pub struct FeedbackLearner {
    analyses: RwLock<HashMap<Uuid, FeedbackAnalysis>>,
}

impl FeedbackLearner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one feedback submission. Infallible; the pipeline never
    /// waits on learning outcomes.
    pub async fn process(
        &self,
        problem_id: Uuid,
        accuracy_rating: u8,
        clarity_rating: ClarityRating,
        comments: Option<&str>,
    ) {
        let suggestions = suggest(accuracy_rating, clarity_rating, comments);
        debug!(
            %problem_id,
            count = suggestions.len(),
            "feedback analyzed"
        );

        let mut analyses = self.analyses.write().await;
        analyses.insert(
            problem_id,
            FeedbackAnalysis {
                problem_id,
                suggestions,
                analyzed_at: Utc::now(),
            },
        );
    }

    pub async fn analysis_for(&self, problem_id: Uuid) -> Option<FeedbackAnalysis> {
        self.analyses.read().await.get(&problem_id).cloned()
    }

    pub async fn analyzed_count(&self) -> usize {
        self.analyses.read().await.len()
    }
}

/// The suggestion rules: low accuracy, unclear explanations, and
/// comment cues each contribute targeted follow-ups.
fn suggest(
    accuracy_rating: u8,
    clarity_rating: ClarityRating,
    comments: Option<&str>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if accuracy_rating <= 2 {
        suggestions.push("Review mathematical accuracy of the solution".to_string());
        suggestions.push("Verify calculation steps".to_string());
    }

    if clarity_rating == ClarityRating::Unclear {
        suggestions.push("Provide more detailed explanations".to_string());
        suggestions.push("Break down complex steps into smaller parts".to_string());
        suggestions.push("Add more context for mathematical concepts".to_string());
    }

    if let Some(comments) = comments {
        let lower = comments.to_lowercase();
        if lower.contains("confusing") {
            suggestions.push("Simplify language and explanations".to_string());
        }
        if lower.contains("wrong") {
            suggestions.push("Double-check mathematical calculations".to_string());
        }
        if lower.contains("incomplete") {
            suggestions.push("Provide more comprehensive solution steps".to_string());
        }
    }

    suggestions
}
