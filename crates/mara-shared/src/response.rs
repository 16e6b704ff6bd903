//! The solve-response envelope.
//!
//! This is the one externally stable contract: outer layers (HTTP
//! gateways, CLIs, benchmark harnesses) all consume this shape.

use crate::problem::{Category, Difficulty, SolutionSource};
use crate::solution::Solution;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    /// The sanitized problem text that was actually solved.
    pub problem: String,
    pub solution: Solution,
    pub source: SolutionSource,
    /// Wall-clock duration from request entry to response assembly.
    #[serde(rename = "response_time")]
    pub response_time_ms: u64,
    pub category: Category,
    pub problem_id: Uuid,
    pub confidence_score: f64,
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Step;

    #[test]
    fn response_time_field_keeps_wire_name() {
        let response = SolveResponse {
            problem: "solve x = 1".to_string(),
            solution: Solution::new(vec![Step::new(1, "t", "c", "e")], "x = 1"),
            source: SolutionSource::MathSolver,
            response_time_ms: 12,
            category: Category::Algebra,
            problem_id: Uuid::new_v4(),
            confidence_score: 0.95,
            difficulty: Difficulty::Basic,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["response_time"], 12);
        assert_eq!(json["source"], "math_solver");
        assert!(json.get("response_time_ms").is_none());
    }
}
