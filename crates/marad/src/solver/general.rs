//! The always-succeeding general scaffold.
//!
//! Terminal state of the dispatch chain: any strategy that matches but
//! cannot derive, and any input no strategy recognizes, lands here. The
//! category label is re-derived coarsely for the narrative and is
//! deliberately independent of the router's classification.

use mara_shared::{Solution, Step};

fn coarse_category(lower: &str) -> &'static str {
    if ["derivative", "differentiate"].iter().any(|c| lower.contains(c)) {
        "calculus"
    } else if ["solve", "equation"].iter().any(|c| lower.contains(c)) {
        "algebra"
    } else if ["area", "volume", "triangle"].iter().any(|c| lower.contains(c)) {
        "geometry"
    } else {
        "general"
    }
}

/// Produce the diagnostic three-step scaffold. Always succeeds.
pub fn solve(problem: &str) -> Solution {
    let lower = problem.to_lowercase();
    let category = coarse_category(&lower);

    let steps = vec![
        Step::new(
            1,
            "Problem Analysis",
            format!("Analyzing: {}", problem),
            format!("This appears to be a {} problem. Let me break it down.", category),
        ),
        Step::new(
            2,
            "Solution Approach",
            "Applying mathematical principles to solve this problem",
            "Using standard mathematical methods for this type of problem",
        ),
        Step::new(
            3,
            "Result",
            "Please provide more specific details about the mathematical expression \
             or equation",
            "For a more detailed solution, I need the exact mathematical notation",
        ),
    ];

    Solution::new(
        steps,
        "Please provide the specific mathematical expression for a detailed \
         step-by-step solution",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_produces_a_well_formed_solution() {
        for input in ["", "gibberish", "solve", "面积", "\u{0000}"] {
            let s = solve(input);
            assert!(s.is_well_formed(), "not well-formed for {input:?}");
            assert_eq!(s.steps.len(), 3);
        }
    }

    #[test]
    fn narrative_category_is_rederived_independently() {
        let s = solve("something about a derivative");
        assert!(s.steps[0].explanation.contains("calculus"));

        let s = solve("the area of things");
        assert!(s.steps[0].explanation.contains("geometry"));

        let s = solve("nothing mathematical");
        assert!(s.steps[0].explanation.contains("general"));
    }
}
