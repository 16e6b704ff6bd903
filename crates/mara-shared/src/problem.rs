//! Problem records and their classification axes.

use crate::solution::Solution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed category taxonomy for submitted problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Algebra,
    Calculus,
    Geometry,
    Statistics,
    Trigonometry,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Algebra => "algebra",
            Category::Calculus => "calculus",
            Category::Geometry => "geometry",
            Category::Statistics => "statistics",
            Category::Trigonometry => "trigonometry",
            Category::General => "general",
        }
    }

    /// All categories with a curated corpus, i.e. everything but the
    /// catch-all.
    pub fn curated() -> [Category; 5] {
        [
            Category::Algebra,
            Category::Calculus,
            Category::Geometry,
            Category::Statistics,
            Category::Trigonometry,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Difficulty tier assigned at classification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", s)
    }
}

/// Which pipeline stage produced the winning solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionSource {
    KnowledgeBase,
    MathSolver,
    WebSearch,
    Fallback,
}

impl std::fmt::Display for SolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SolutionSource::KnowledgeBase => "knowledge_base",
            SolutionSource::MathSolver => "math_solver",
            SolutionSource::WebSearch => "web_search",
            SolutionSource::Fallback => "fallback",
        };
        write!(f, "{}", s)
    }
}

/// Immutable record of a solved problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub text: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub source: SolutionSource,
    pub solution: Solution,
    pub created_at: DateTime<Utc>,
}

impl Problem {
    pub fn new(
        text: impl Into<String>,
        solution: Solution,
        category: Category,
        difficulty: Difficulty,
        source: SolutionSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            category,
            difficulty,
            source,
            solution,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_snake_case_wire_forms() {
        assert_eq!(
            serde_json::to_value(SolutionSource::KnowledgeBase).unwrap(),
            "knowledge_base"
        );
        assert_eq!(serde_json::to_value(Category::Trigonometry).unwrap(), "trigonometry");
        assert_eq!(serde_json::to_value(Difficulty::Hard).unwrap(), "hard");
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Category::Algebra.to_string(), "algebra");
        assert_eq!(SolutionSource::MathSolver.to_string(), "math_solver");
    }
}
