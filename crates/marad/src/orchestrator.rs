//! The routing orchestrator.
//!
//! Per-request pipeline: sanitize → validate (reject early) → classify →
//! solve → persist → respond. Routing policy is **solver-first**: the
//! symbolic solver runs on every validated request and a non-degraded
//! result is authoritative. Only when the solver degrades to its general
//! scaffold does the pipeline consult the knowledge retriever, then web
//! synthesis. Every reached stage appends exactly one activity record.
//!
//! Only two failure classes surface to the caller: validator rejection
//! (client error) and persistence failure (server error). Everything
//! else degrades to a well-formed, low-confidence solution.

use crate::config::RouterConfig;
use crate::feedback::FeedbackLearner;
use crate::guardrails::{self, Verdict};
use crate::knowledge::KnowledgeBase;
use crate::router;
use crate::solver::{self, SolverVerdict};
use crate::storage::{FeedbackStats, KnowledgeBaseStats, MemoryStore};
use crate::websearch::{self, SearchStatus, WebSearch};
use mara_shared::{
    Activity, Category, ClarityRating, Difficulty, Feedback, MaraError, Solution,
    SolutionSource, SolveResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Confidence assigned to an authoritative symbolic derivation.
pub const SOLVER_CONFIDENCE: f64 = 0.95;

/// Floor passed to retrieval; the acceptance threshold in
/// `RouterConfig` is applied on top of this.
const RETRIEVAL_FLOOR: f64 = 0.1;

/// Confidence for the terminal diagnostic fallback.
const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Component summary for the status surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub version: String,
    pub knowledge_retriever: String,
    pub web_search: String,
    pub guardrails: String,
    pub feedback_system: String,
    pub knowledge_base: KnowledgeBaseStats,
    pub feedback: FeedbackStats,
    pub recent_activity: Vec<Activity>,
}

/// The dependency-injected pipeline. Collaborators are shared handles
/// with process lifetime.
pub struct Orchestrator {
    store: Arc<MemoryStore>,
    knowledge: Arc<KnowledgeBase>,
    search: Arc<WebSearch>,
    learner: Arc<FeedbackLearner>,
    config: RouterConfig,
}

impl Orchestrator {
    pub fn new(
        store: Arc<MemoryStore>,
        knowledge: Arc<KnowledgeBase>,
        search: Arc<WebSearch>,
        learner: Arc<FeedbackLearner>,
        config: RouterConfig,
    ) -> Self {
        Self {
            store,
            knowledge,
            search,
            learner,
            config,
        }
    }

    /// Solve a free-text problem, returning the stable response
    /// envelope.
    pub async fn solve(&self, raw_problem: &str) -> Result<SolveResponse, MaraError> {
        let started = Instant::now();
        let problem = guardrails::sanitize(raw_problem);

        let validation = guardrails::validate(&problem);
        let confidence = match validation {
            Verdict::Rejected { reason, kind } => {
                debug!(?kind, "input rejected by guardrails");
                self.store
                    .create_activity("Problem rejected", "guardrails", Some(reason.clone()))
                    .await?;
                return Err(MaraError::InvalidInput { reason });
            }
            Verdict::Valid { confidence, .. } => confidence,
        };

        // Category and difficulty are computed up front, independent of
        // which solving path wins.
        let category = router::classify(&problem);
        let difficulty = router::classify_difficulty(&problem, category);
        debug!(%category, %difficulty, confidence, "problem classified");

        self.store
            .create_activity(
                "Problem submitted",
                "user_input",
                Some(format!(
                    "Category: {}, Problem: {}",
                    category,
                    truncate(&problem, 100)
                )),
            )
            .await?;

        let (solution, source, category, difficulty, score) = match solver::solve(&problem) {
            SolverVerdict::Solved { kind, solution } => {
                self.store
                    .create_activity(
                        "Solution found",
                        "math_solver",
                        Some(format!("Strategy: {}", kind)),
                    )
                    .await?;
                (
                    solution,
                    SolutionSource::MathSolver,
                    category,
                    difficulty,
                    SOLVER_CONFIDENCE,
                )
            }
            SolverVerdict::Degraded { .. } => {
                self.resolve_degraded(&problem, category).await?
            }
        };

        let record = self
            .store
            .create_problem(&problem, solution, category, difficulty, source)
            .await?;

        let response_time_ms = started.elapsed().as_millis() as u64;
        info!(
            problem_id = %record.id,
            %source,
            %category,
            response_time_ms,
            "solve request completed"
        );

        Ok(SolveResponse {
            problem,
            solution: record.solution.clone(),
            source,
            response_time_ms,
            category,
            problem_id: record.id,
            confidence_score: score,
            difficulty,
        })
    }

    /// The solver produced only its diagnostic scaffold: consult the
    /// retriever, then web synthesis. Web synthesis always yields a
    /// well-formed solution, so this path cannot fail short of a
    /// storage error.
    async fn resolve_degraded(
        &self,
        problem: &str,
        category: Category,
    ) -> Result<(Solution, SolutionSource, Category, Difficulty, f64), MaraError> {
        let hits = self
            .knowledge
            .search(problem, self.config.retrieval_limit, RETRIEVAL_FLOOR)
            .await;

        if let Some(top) = hits.first() {
            if top.similarity > self.config.similarity_threshold {
                // Trust the router's category unless it punted to the
                // catch-all.
                let final_category = if category == Category::General {
                    top.category
                } else {
                    category
                };
                self.store
                    .create_activity(
                        "Solution found",
                        "knowledge_base",
                        Some(format!("Similarity: {:.2}", top.similarity)),
                    )
                    .await?;
                return Ok((
                    top.solution.clone(),
                    SolutionSource::KnowledgeBase,
                    final_category,
                    Difficulty::Intermediate,
                    top.similarity,
                ));
            }
            debug!(
                similarity = top.similarity,
                threshold = self.config.similarity_threshold,
                "best retrieval hit below threshold"
            );
        }

        let outcome = self.search.search(problem).await;
        if outcome.snippets.is_empty() {
            warn!("live search returned no snippets; synthesis degrades to advanced-topic note");
        }

        let solution = websearch::synthesize(problem, &outcome.snippets);
        let score = solution.confidence_score.unwrap_or(FALLBACK_CONFIDENCE);
        let (source, action_detail) = match outcome.status {
            SearchStatus::Live => (
                SolutionSource::WebSearch,
                format!("Sources: {} found", outcome.snippets.len()),
            ),
            // Canned snippets are clearly marked as such in provenance.
            SearchStatus::Placeholder => (
                SolutionSource::Fallback,
                format!("Placeholder sources: {}", outcome.snippets.len()),
            ),
        };
        self.store
            .create_activity("Solution found", source.to_string().as_str(), Some(action_detail))
            .await?;

        Ok((solution, source, category, Difficulty::Hard, score))
    }

    /// Record user feedback and hand it to the learning sink.
    pub async fn submit_feedback(
        &self,
        problem_id: Uuid,
        accuracy_rating: u8,
        clarity_rating: ClarityRating,
        comments: Option<String>,
        is_helpful: bool,
    ) -> Result<Feedback, MaraError> {
        let feedback = self
            .store
            .create_feedback(
                problem_id,
                accuracy_rating,
                clarity_rating,
                comments.clone(),
                is_helpful,
            )
            .await?;

        // Fire-and-forget: learning never blocks or fails the pipeline.
        self.learner
            .process(
                problem_id,
                accuracy_rating,
                clarity_rating,
                comments.as_deref(),
            )
            .await;

        self.store
            .create_activity(
                "Feedback received",
                "user_feedback",
                Some(format!(
                    "Rating: {}/5, Clarity: {}",
                    accuracy_rating, clarity_rating
                )),
            )
            .await?;

        Ok(feedback)
    }

    pub async fn recent_activity(&self, limit: usize) -> Vec<Activity> {
        self.store.recent_activity(limit).await
    }

    pub async fn status(&self) -> StatusReport {
        let guard = guardrails::status();
        StatusReport {
            version: mara_shared::VERSION.to_string(),
            knowledge_retriever: format!("online ({} entries)", self.knowledge.len().await),
            web_search: self.search.credential_status().to_string(),
            guardrails: format!(
                "active ({} keywords, {} privacy patterns)",
                guard.keywords, guard.privacy_patterns
            ),
            feedback_system: format!(
                "learning ({} analyses)",
                self.learner.analyzed_count().await
            ),
            knowledge_base: self.store.knowledge_base_stats().await,
            feedback: self.store.feedback_stats().await,
            recent_activity: self.store.recent_activity(5).await,
        }
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
