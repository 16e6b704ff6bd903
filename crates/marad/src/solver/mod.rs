//! Symbolic solving strategies.
//!
//! Dispatch is an ordered table of (detector, handler) pairs, evaluated
//! first-match-wins: equation, derivative, integral, limit, geometry,
//! trigonometry, statistics. Detectors are independent keyword tests and
//! may overlap; the table order is the tie-break. A matched strategy
//! either produces a `Solution` or signals `NeedsFallback`, in which case
//! the always-succeeding general scaffold answers. The solver as a whole
//! never errors: every input yields a well-formed solution.

pub mod algebra;
pub mod calculus;
pub mod general;
pub mod geometry;
pub mod stats;
pub mod symbolic;
pub mod trig;

use mara_shared::Solution;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strategy families, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Equation,
    Derivative,
    Integral,
    Limit,
    Geometry,
    Trigonometry,
    Statistics,
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProblemKind::Equation => "equation",
            ProblemKind::Derivative => "derivative",
            ProblemKind::Integral => "integral",
            ProblemKind::Limit => "limit",
            ProblemKind::Geometry => "geometry",
            ProblemKind::Trigonometry => "trigonometry",
            ProblemKind::Statistics => "statistics",
        };
        write!(f, "{}", s)
    }
}

/// What a single strategy produced.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    Solved(Solution),
    /// The strategy matched but could not derive anything; route to the
    /// general scaffold.
    NeedsFallback,
}

/// Solver-level result, distinguishing a real derivation from the
/// diagnostic scaffold so the orchestrator can decide whether to consult
/// other sources.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverVerdict {
    Solved {
        kind: ProblemKind,
        solution: Solution,
    },
    /// Only the general scaffold applied.
    Degraded { solution: Solution },
}

impl SolverVerdict {
    pub fn solution(&self) -> &Solution {
        match self {
            SolverVerdict::Solved { solution, .. } => solution,
            SolverVerdict::Degraded { solution } => solution,
        }
    }

    pub fn into_solution(self) -> Solution {
        match self {
            SolverVerdict::Solved { solution, .. } => solution,
            SolverVerdict::Degraded { solution } => solution,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SolverVerdict::Degraded { .. })
    }
}

struct Strategy {
    kind: ProblemKind,
    detect: fn(&str) -> bool,
    solve: fn(&str) -> StrategyOutcome,
}

/// The dispatch table. Order is load-bearing.
const STRATEGIES: &[Strategy] = &[
    Strategy {
        kind: ProblemKind::Equation,
        detect: algebra::detect_equation,
        solve: algebra::solve_equation,
    },
    Strategy {
        kind: ProblemKind::Derivative,
        detect: calculus::detect_derivative,
        solve: calculus::solve_derivative,
    },
    Strategy {
        kind: ProblemKind::Integral,
        detect: calculus::detect_integral,
        solve: calculus::solve_integral,
    },
    Strategy {
        kind: ProblemKind::Limit,
        detect: calculus::detect_limit,
        solve: calculus::solve_limit,
    },
    Strategy {
        kind: ProblemKind::Geometry,
        detect: geometry::detect,
        solve: geometry::solve,
    },
    Strategy {
        kind: ProblemKind::Trigonometry,
        detect: trig::detect,
        solve: trig::solve,
    },
    Strategy {
        kind: ProblemKind::Statistics,
        detect: stats::detect,
        solve: stats::solve,
    },
];

/// Which strategy family would handle the given problem, if any.
/// Exposed so the dispatch priority is testable in isolation.
pub fn detect_kind(problem: &str) -> Option<ProblemKind> {
    let lower = problem.to_lowercase();
    STRATEGIES
        .iter()
        .find(|s| (s.detect)(&lower))
        .map(|s| s.kind)
}

/// Solve a problem. Never fails: a strategy that matches but cannot
/// derive routes to the general scaffold, as does input no strategy
/// recognizes.
pub fn solve(problem: &str) -> SolverVerdict {
    let lower = problem.to_lowercase();

    for strategy in STRATEGIES {
        if !(strategy.detect)(&lower) {
            continue;
        }
        match (strategy.solve)(problem) {
            StrategyOutcome::Solved(solution) => {
                debug!(kind = %strategy.kind, "strategy produced a derivation");
                return SolverVerdict::Solved {
                    kind: strategy.kind,
                    solution,
                };
            }
            StrategyOutcome::NeedsFallback => {
                debug!(kind = %strategy.kind, "strategy matched but degraded");
                break;
            }
        }
    }

    SolverVerdict::Degraded {
        solution: general::solve(problem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_order_equation_before_statistics() {
        // Both cues present; the equation strategy is earlier in the
        // table.
        assert_eq!(
            detect_kind("solve for the mean value x = 3"),
            Some(ProblemKind::Equation)
        );
    }

    #[test]
    fn dispatch_order_derivative_before_geometry() {
        assert_eq!(
            detect_kind("derivative of the area function"),
            Some(ProblemKind::Derivative)
        );
    }

    #[test]
    fn unrecognized_input_degrades() {
        let verdict = solve("ponder the imponderable");
        assert!(verdict.is_degraded());
        assert!(verdict.solution().is_well_formed());
    }

    #[test]
    fn matched_but_unparsable_input_degrades() {
        // Equation cue present, nothing parsable.
        let verdict = solve("solve it somehow");
        assert!(verdict.is_degraded());
        assert!(verdict.solution().is_well_formed());
    }

    #[test]
    fn limit_problems_degrade_by_design() {
        let verdict = solve("find the limit as x approaches 0 of sin(x)/x");
        assert!(verdict.is_degraded());
    }
}
