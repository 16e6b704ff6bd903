//! Deterministic problem classification.
//!
//! Category and difficulty are keyword-driven, evaluated as an ordered
//! rule list where the first matching rule wins. The order is a
//! deliberate tie-break: calculus cues outrank algebra, algebra outranks
//! geometry, and so on, so a problem mentioning both "derivative" and
//! "triangle" classifies as calculus.

use mara_shared::{Category, Difficulty};

/// Ordered (category, cues) rules; first match wins.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Calculus,
        &["derivative", "differentiate", "integrate", "integration", "limit", "d/dx", "∫"],
    ),
    (
        Category::Algebra,
        &["equation", "solve", "factor", "quadratic", "linear", "polynomial", "system"],
    ),
    (
        Category::Geometry,
        &["triangle", "circle", "area", "volume", "perimeter", "angle", "coordinate"],
    ),
    (
        Category::Statistics,
        &["mean", "median", "mode", "standard deviation", "variance", "probability"],
    ),
    (
        Category::Trigonometry,
        &["sin", "cos", "tan", "trigonometric", "radian", "degree"],
    ),
];

/// Cues that mark a problem as hard regardless of category.
const HARD_CUES: &[&str] = &[
    "integration by parts",
    "complex",
    "limit",
    "infinite",
    "second derivative",
    "nested",
    "system",
];

/// Cues that mark a problem as explicitly basic.
const BASIC_CUES: &[&str] = &["simple", "easy", "basic", "find x"];

/// Map problem text to its category. Pure function, case-insensitive.
pub fn classify(problem: &str) -> Category {
    let lower = problem.to_lowercase();

    for (category, cues) in CATEGORY_RULES {
        if cues.iter().any(|cue| lower.contains(cue)) {
            return *category;
        }
    }

    Category::General
}

/// Assign a difficulty tier from keyword cues, falling back to a
/// category-keyed default.
pub fn classify_difficulty(problem: &str, category: Category) -> Difficulty {
    let lower = problem.to_lowercase();

    if HARD_CUES.iter().any(|cue| lower.contains(cue)) {
        return Difficulty::Hard;
    }

    if BASIC_CUES.iter().any(|cue| lower.contains(cue)) {
        return Difficulty::Basic;
    }

    // Curated corpora for these categories are dominated by special-case
    // identities a student meets first; everything else defaults to the
    // middle tier.
    match category {
        Category::Geometry | Category::Trigonometry => Difficulty::Basic,
        _ => Difficulty::Intermediate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculus_outranks_geometry() {
        assert_eq!(
            classify("find the derivative of x^2 and the area of a triangle"),
            Category::Calculus
        );
    }

    #[test]
    fn algebra_outranks_geometry() {
        assert_eq!(
            classify("solve for the area... actually solve this equation"),
            Category::Algebra
        );
    }

    #[test]
    fn each_category_has_a_direct_route() {
        assert_eq!(classify("integrate 2x dx"), Category::Calculus);
        assert_eq!(classify("factor the quadratic"), Category::Algebra);
        assert_eq!(classify("perimeter of a rectangle... angle"), Category::Geometry);
        assert_eq!(classify("what is the median"), Category::Statistics);
        assert_eq!(classify("value of tan at 45 degrees"), Category::Trigonometry);
        assert_eq!(classify("what is seven plus four"), Category::General);
    }

    #[test]
    fn difficulty_cues_override_defaults() {
        assert_eq!(
            classify_difficulty("evaluate using integration by parts", Category::Calculus),
            Difficulty::Hard
        );
        assert_eq!(
            classify_difficulty("a simple triangle question", Category::Geometry),
            Difficulty::Basic
        );
        assert_eq!(
            classify_difficulty("differentiate f(x) = x^3", Category::Calculus),
            Difficulty::Intermediate
        );
    }

    #[test]
    fn system_language_is_hard() {
        assert_eq!(
            classify_difficulty("solve the system 2x + 3y = 7, x - y = 1", Category::Algebra),
            Difficulty::Hard
        );
    }
}
