//! In-process storage for problems, feedback, and activity records.
//!
//! Process-lifetime state behind an `RwLock`, injected by handle into
//! the orchestrator. The write contracts return `Result` so a real
//! persistence layer can slot in behind the same signatures; a failed
//! write is the one failure class the pipeline surfaces to callers.

use mara_shared::{
    Activity, Category, ClarityRating, Difficulty, Feedback, MaraError, Problem, Solution,
    SolutionSource,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Aggregate feedback figures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total: usize,
    pub average_rating: f64,
    pub helpful_percentage: f64,
}

/// Per-category problem counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBaseStats {
    pub total: usize,
    pub by_category: BTreeMap<Category, usize>,
}

/// Serializable snapshot for backup tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreExport {
    pub problems: Vec<Problem>,
    pub feedback: Vec<Feedback>,
    pub activity: Vec<Activity>,
}

#[derive(Default)]
struct StoreInner {
    problems: HashMap<Uuid, Problem>,
    feedback: HashMap<Uuid, Feedback>,
    /// Append-only, insertion-ordered.
    activity: Vec<Activity>,
}

/// Shared in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_problem(
        &self,
        text: &str,
        solution: Solution,
        category: Category,
        difficulty: Difficulty,
        source: SolutionSource,
    ) -> Result<Problem, MaraError> {
        let problem = Problem::new(text, solution, category, difficulty, source);
        let mut inner = self.inner.write().await;
        inner.problems.insert(problem.id, problem.clone());
        Ok(problem)
    }

    pub async fn problem(&self, id: Uuid) -> Option<Problem> {
        self.inner.read().await.problems.get(&id).cloned()
    }

    pub async fn problems_by_category(&self, category: Category) -> Vec<Problem> {
        self.inner
            .read()
            .await
            .problems
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over stored problem text.
    pub async fn search_problems(&self, query: &str) -> Vec<Problem> {
        let needle = query.to_lowercase();
        self.inner
            .read()
            .await
            .problems
            .values()
            .filter(|p| p.text.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub async fn problem_count(&self) -> usize {
        self.inner.read().await.problems.len()
    }

    pub async fn create_feedback(
        &self,
        problem_id: Uuid,
        accuracy_rating: u8,
        clarity_rating: ClarityRating,
        comments: Option<String>,
        is_helpful: bool,
    ) -> Result<Feedback, MaraError> {
        let feedback = Feedback::new(
            problem_id,
            accuracy_rating,
            clarity_rating,
            comments,
            is_helpful,
        )?;
        let mut inner = self.inner.write().await;
        inner.feedback.insert(feedback.id, feedback.clone());
        Ok(feedback)
    }

    pub async fn feedback_for_problem(&self, problem_id: Uuid) -> Vec<Feedback> {
        self.inner
            .read()
            .await
            .feedback
            .values()
            .filter(|f| f.problem_id == problem_id)
            .cloned()
            .collect()
    }

    pub async fn feedback_stats(&self) -> FeedbackStats {
        let inner = self.inner.read().await;
        let total = inner.feedback.len();
        if total == 0 {
            return FeedbackStats::default();
        }

        let rating_sum: u32 = inner
            .feedback
            .values()
            .map(|f| f.accuracy_rating as u32)
            .sum();
        let helpful = inner.feedback.values().filter(|f| f.is_helpful).count();

        FeedbackStats {
            total,
            average_rating: rating_sum as f64 / total as f64,
            helpful_percentage: helpful as f64 / total as f64 * 100.0,
        }
    }

    pub async fn create_activity(
        &self,
        action: &str,
        source: &str,
        detail: Option<String>,
    ) -> Result<Activity, MaraError> {
        let activity = Activity::new(action, source, detail);
        let mut inner = self.inner.write().await;
        inner.activity.push(activity.clone());
        Ok(activity)
    }

    /// Most recent first.
    pub async fn recent_activity(&self, limit: usize) -> Vec<Activity> {
        self.inner
            .read()
            .await
            .activity
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn activity_by_source(&self, source: &str) -> Vec<Activity> {
        self.inner
            .read()
            .await
            .activity
            .iter()
            .filter(|a| a.source == source)
            .cloned()
            .collect()
    }

    pub async fn knowledge_base_stats(&self) -> KnowledgeBaseStats {
        let inner = self.inner.read().await;
        let mut by_category: BTreeMap<Category, usize> = BTreeMap::new();
        for category in Category::curated() {
            by_category.insert(category, 0);
        }
        for problem in inner.problems.values() {
            *by_category.entry(problem.category).or_insert(0) += 1;
        }

        KnowledgeBaseStats {
            total: inner.problems.len(),
            by_category,
        }
    }

    pub async fn export(&self) -> StoreExport {
        let inner = self.inner.read().await;
        StoreExport {
            problems: inner.problems.values().cloned().collect(),
            feedback: inner.feedback.values().cloned().collect(),
            activity: inner.activity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mara_shared::Step;

    fn solution() -> Solution {
        Solution::new(vec![Step::new(1, "t", "c", "e")], "answer")
    }

    #[tokio::test]
    async fn recent_activity_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .create_activity("Problem submitted", "user_input", Some(format!("n{}", i)))
                .await
                .unwrap();
        }

        let recent = store.recent_activity(3).await;
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].detail.as_deref(), Some("n4"));
        assert_eq!(recent[2].detail.as_deref(), Some("n2"));
    }

    #[tokio::test]
    async fn category_stats_count_problems() {
        let store = MemoryStore::new();
        store
            .create_problem(
                "solve x = 1",
                solution(),
                Category::Algebra,
                Difficulty::Basic,
                SolutionSource::MathSolver,
            )
            .await
            .unwrap();
        store
            .create_problem(
                "area of circle",
                solution(),
                Category::Geometry,
                Difficulty::Basic,
                SolutionSource::MathSolver,
            )
            .await
            .unwrap();

        let stats = store.knowledge_base_stats().await;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_category[&Category::Algebra], 1);
        assert_eq!(stats.by_category[&Category::Geometry], 1);
        assert_eq!(stats.by_category[&Category::Statistics], 0);
    }

    #[tokio::test]
    async fn feedback_stats_aggregate() {
        let store = MemoryStore::new();
        let pid = Uuid::new_v4();
        store
            .create_feedback(pid, 5, ClarityRating::VeryClear, None, true)
            .await
            .unwrap();
        store
            .create_feedback(pid, 3, ClarityRating::Unclear, None, false)
            .await
            .unwrap();

        let stats = store.feedback_stats().await;
        assert_eq!(stats.total, 2);
        assert!((stats.average_rating - 4.0).abs() < 1e-12);
        assert!((stats.helpful_percentage - 50.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn invalid_rating_is_rejected_by_the_store() {
        let store = MemoryStore::new();
        let result = store
            .create_feedback(Uuid::new_v4(), 9, ClarityRating::Unclear, None, false)
            .await;
        assert!(result.is_err());
        assert_eq!(store.feedback_stats().await.total, 0);
    }

    #[tokio::test]
    async fn substring_search_over_problem_text() {
        let store = MemoryStore::new();
        store
            .create_problem(
                "solve the quadratic equation",
                solution(),
                Category::Algebra,
                Difficulty::Intermediate,
                SolutionSource::MathSolver,
            )
            .await
            .unwrap();

        assert_eq!(store.search_problems("QUADRATIC").await.len(), 1);
        assert!(store.search_problems("trapezoid").await.is_empty());
    }

    #[tokio::test]
    async fn export_contains_all_record_kinds() {
        let store = MemoryStore::new();
        let problem = store
            .create_problem(
                "solve x = 1",
                solution(),
                Category::Algebra,
                Difficulty::Basic,
                SolutionSource::MathSolver,
            )
            .await
            .unwrap();
        store
            .create_feedback(problem.id, 4, ClarityRating::SomewhatClear, None, true)
            .await
            .unwrap();
        store
            .create_activity("Solution found", "math_solver", None)
            .await
            .unwrap();

        let export = store.export().await;
        assert_eq!(export.problems.len(), 1);
        assert_eq!(export.feedback.len(), 1);
        assert_eq!(export.activity.len(), 1);

        // The snapshot must survive a round trip through a backup file.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, serde_json::to_vec_pretty(&export).unwrap()).unwrap();
        let back: StoreExport =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(back.problems[0].id, problem.id);
    }
}
