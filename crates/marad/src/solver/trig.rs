//! Trigonometry strategy: exact values at the π/4 special angle.

use super::StrategyOutcome;
use mara_shared::{Solution, Step};
use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-word cues; substring matching would swallow e.g. the "tan" in
/// "standard deviation" and shadow the statistics strategy.
static TRIG_CUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(sin|cos|tan|trigonometric|angle)\b").expect("trig cue pattern compiles")
});

/// Recognized literal forms of the special-angle question.
const PI_OVER_FOUR_FORMS: &[&str] = &["sin(π/4)", "cos(π/4)", "sin(pi/4)", "cos(pi/4)"];

pub fn detect(lower: &str) -> bool {
    TRIG_CUE_RE.is_match(lower)
}

pub fn solve(problem: &str) -> StrategyOutcome {
    let lower = problem.to_lowercase();
    if !PI_OVER_FOUR_FORMS.iter().any(|form| lower.contains(form)) {
        return StrategyOutcome::NeedsFallback;
    }

    let steps = vec![
        Step::new(
            1,
            "Convert to degrees",
            "π/4 radians = 45°",
            "π radians = 180°, so π/4 = 45°",
        ),
        Step::new(
            2,
            "Use unit circle values",
            "At 45°, both sin and cos equal √2/2",
            "This is a special angle with known exact values",
        ),
    ];

    // Exact symbolic value, never a decimal approximation.
    StrategyOutcome::Solved(Solution::new(
        steps,
        "sin(π/4) = √2/2, cos(π/4) = √2/2",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_angle_returns_exact_radical() {
        let outcome = solve("find sin(π/4) and cos(π/4)");
        match outcome {
            StrategyOutcome::Solved(s) => {
                assert_eq!(s.final_answer, "sin(π/4) = √2/2, cos(π/4) = √2/2");
                assert!(!s.final_answer.contains("0.707"));
            }
            _ => panic!("expected trig derivation"),
        }
    }

    #[test]
    fn ascii_pi_spelling_is_recognized() {
        assert!(matches!(
            solve("evaluate sin(pi/4)"),
            StrategyOutcome::Solved(_)
        ));
    }

    #[test]
    fn other_angles_need_fallback() {
        assert_eq!(
            solve("find sin(π/3)"),
            StrategyOutcome::NeedsFallback
        );
    }

    #[test]
    fn standard_deviation_is_not_a_trig_cue() {
        assert!(!detect("find mean and standard deviation of 2, 4, 6"));
        assert!(detect("find sin(π/4)"));
    }
}
