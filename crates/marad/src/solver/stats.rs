//! Statistics strategy: mean, population variance, standard deviation.

use super::symbolic::fmt_number;
use super::StrategyOutcome;
use mara_shared::{Solution, Step};
use once_cell::sync::Lazy;
use regex::Regex;

const STATS_CUES: &[&str] = &[
    "mean", "average", "median", "mode", "standard deviation", "variance",
];

/// At least this many data points are required for a derivation.
const MIN_DATA_POINTS: usize = 3;

/// At most this many numeric tokens are read from the text.
const MAX_DATA_POINTS: usize = 5;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern compiles"));

pub fn detect(lower: &str) -> bool {
    STATS_CUES.iter().any(|cue| lower.contains(cue))
}

pub fn solve(problem: &str) -> StrategyOutcome {
    let data: Vec<f64> = NUMBER_RE
        .find_iter(problem)
        .take(MAX_DATA_POINTS)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect();

    if data.len() < MIN_DATA_POINTS {
        return StrategyOutcome::NeedsFallback;
    }

    let n = data.len() as f64;
    let sum: f64 = data.iter().sum();
    let mean = sum / n;
    // Population variance, not the sample estimator.
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let listed = data
        .iter()
        .map(|x| fmt_number(*x))
        .collect::<Vec<_>>()
        .join(" + ");
    let deviations = data
        .iter()
        .map(|x| fmt_number((x - mean).powi(2)))
        .collect::<Vec<_>>()
        .join(", ");

    let steps = vec![
        Step::new(
            1,
            "Calculate the mean",
            format!(
                "Mean = ({}) / {} = {} / {} = {}",
                listed,
                data.len(),
                fmt_number(sum),
                data.len(),
                fmt_number(mean)
            ),
            "Sum all values and divide by the number of values",
        ),
        Step::new(
            2,
            "Calculate squared deviations",
            format!("Squared deviations from the mean: [{}]", deviations),
            "Find (xᵢ - μ)² for each data point",
        ),
        Step::new(
            3,
            "Calculate variance and standard deviation",
            format!(
                "Variance = {:.2}\nStandard deviation = √{:.2} = {:.2}",
                variance, variance, std_dev
            ),
            "Variance is the average of squared deviations; standard deviation is \
             its square root",
        ),
    ];

    StrategyOutcome::Solved(Solution::new(
        steps,
        format!(
            "Mean = {}, Standard deviation = {:.2}",
            fmt_number(mean),
            std_dev
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_dataset_population_statistics() {
        let outcome = solve("find mean and standard deviation of 2, 4, 6, 8, 10");
        match outcome {
            StrategyOutcome::Solved(s) => {
                assert_eq!(s.final_answer, "Mean = 6, Standard deviation = 2.83");
                assert!(s.steps[2].content.contains("Variance = 8.00"));
            }
            _ => panic!("expected statistics derivation"),
        }
    }

    #[test]
    fn population_variance_matches_formula() {
        let data = [2.0, 4.0, 6.0, 8.0, 10.0];
        let mean: f64 = data.iter().sum::<f64>() / data.len() as f64;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64;
        assert_relative_eq!(variance, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn too_few_numbers_need_fallback() {
        assert_eq!(
            solve("what is the mean of 4 and 6"),
            StrategyOutcome::NeedsFallback
        );
    }

    #[test]
    fn only_first_five_numbers_are_read() {
        let outcome = solve("mean of 1, 1, 1, 1, 1, 99, 99");
        match outcome {
            StrategyOutcome::Solved(s) => {
                assert_eq!(s.final_answer, "Mean = 1, Standard deviation = 0.00");
            }
            _ => panic!("expected statistics derivation"),
        }
    }
}
