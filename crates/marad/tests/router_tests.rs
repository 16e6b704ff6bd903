//! Golden tests for the deterministic category router.
//!
//! Verifies the ordered keyword rules and their tie-breaks against a
//! small corpus of representative queries.

use mara_shared::{Category, Difficulty};
use marad::router::{classify, classify_difficulty};

#[test]
fn golden_corpus_classification() {
    let corpus: &[(&str, Category)] = &[
        ("solve x^2 + 5x + 6 = 0", Category::Algebra),
        ("find the derivative of 3x^3 + 2x^2 - 5x + 1", Category::Calculus),
        ("integrate 2x dx", Category::Calculus),
        ("what is the limit as x approaches infinity", Category::Calculus),
        ("calculate area of circle with radius 5", Category::Geometry),
        ("calculate area of triangle with sides 3, 4, 5", Category::Geometry),
        ("find mean and standard deviation of 2, 4, 6, 8, 10", Category::Statistics),
        ("probability of rolling two sixes", Category::Statistics),
        ("find sin(π/4) and cos(π/4)", Category::Trigonometry),
        ("convert 90 degrees to radians", Category::Trigonometry),
        ("what is seven plus twelve", Category::General),
    ];

    for (query, expected) in corpus {
        assert_eq!(
            classify(query),
            *expected,
            "misclassified {query:?}"
        );
    }
}

#[test]
fn calculus_outranks_geometry_on_ties() {
    // Spec tie-break: calculus cues are checked before geometry cues.
    assert_eq!(
        classify("find the derivative of x^2 and the area of a triangle"),
        Category::Calculus
    );
}

#[test]
fn algebra_outranks_statistics_on_ties() {
    assert_eq!(
        classify("solve for the mean value of the equation"),
        Category::Algebra
    );
}

#[test]
fn statistics_outranks_trigonometry_despite_substring_overlap() {
    // "standard" contains "tan"; the rule order keeps this in
    // statistics.
    assert_eq!(
        classify("compute the standard deviation"),
        Category::Statistics
    );
}

#[test]
fn difficulty_tiers() {
    assert_eq!(
        classify_difficulty("solve using integration by parts", Category::Calculus),
        Difficulty::Hard
    );
    assert_eq!(
        classify_difficulty("an infinite series question", Category::Calculus),
        Difficulty::Hard
    );
    assert_eq!(
        classify_difficulty("a simple perimeter question", Category::Geometry),
        Difficulty::Basic
    );
    assert_eq!(
        classify_difficulty("find x in 2x = 8", Category::Algebra),
        Difficulty::Basic
    );
    assert_eq!(
        classify_difficulty("factor the polynomial", Category::Algebra),
        Difficulty::Intermediate
    );
    // Category-keyed default.
    assert_eq!(
        classify_difficulty("area of a circle with radius 5", Category::Geometry),
        Difficulty::Basic
    );
}
