//! Equation and linear-system strategies.

use super::symbolic::{fmt_number, normalize_notation, Polynomial};
use super::StrategyOutcome;
use mara_shared::{Solution, Step};
use once_cell::sync::Lazy;
use regex::Regex;

const EQUATION_CUES: &[&str] = &["solve", "equation", "find x", "find y"];

/// Known demo quadratic, recognized literally in both notations.
const KNOWN_QUADRATICS: &[&str] = &["x² + 5x + 6 = 0", "x^2 + 5x + 6 = 0"];

static LINEAR_EQ_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(-?\d*\.?\d*)\s*x\s*([+-])\s*(\d*\.?\d*)\s*y\s*=\s*(-?\d+\.?\d*)")
        .expect("linear equation pattern compiles")
});

pub fn detect_equation(lower: &str) -> bool {
    lower.contains('=') || EQUATION_CUES.iter().any(|cue| lower.contains(cue))
}

pub fn solve_equation(problem: &str) -> StrategyOutcome {
    let normalized = normalize_notation(&problem.to_lowercase());

    // Two recognizable linear equations take the system path.
    let systems: Vec<LinearEq> = LINEAR_EQ_RE
        .captures_iter(&normalized)
        .filter_map(LinearEq::from_captures)
        .collect();
    if systems.len() >= 2 {
        return solve_system(&systems[0], &systems[1]);
    }

    let equation_str = match extract_equation(problem, &normalized) {
        Some(eq) => eq,
        None => return StrategyOutcome::NeedsFallback,
    };

    let (lhs_txt, rhs_txt) = match equation_str.split_once('=') {
        Some(parts) => parts,
        None => return StrategyOutcome::NeedsFallback,
    };

    let lhs = match parse_with_prefix_trim(lhs_txt) {
        Some(p) => p,
        None => return StrategyOutcome::NeedsFallback,
    };
    let rhs = match Polynomial::parse(rhs_txt) {
        Ok(p) => p,
        Err(_) => return StrategyOutcome::NeedsFallback,
    };

    let poly = lhs.sub(&rhs);
    let var = poly.var();
    let roots = match poly.real_roots() {
        Some(roots) => roots,
        // Degree beyond the engine; hand over to the fallback chain.
        None => return StrategyOutcome::NeedsFallback,
    };

    // Canonical display form, free of any surrounding prose the
    // extraction swept up.
    let display_eq = format!("{} = {}", lhs, rhs);

    let mut steps = Vec::new();
    let quadratic_shape =
        display_eq.matches(var).count() > 1 && display_eq.contains(&format!("{}^2", var));

    if quadratic_shape {
        steps.push(Step::new(
            1,
            "Identify the quadratic equation",
            display_eq.clone(),
            "This is a quadratic equation in standard form ax² + bx + c = 0",
        ));

        if let Some(factored) = poly.factored_form() {
            steps.push(Step::new(
                2,
                "Factor the quadratic expression",
                format!("{} = {}", poly, factored),
                "Factor the quadratic expression to find the roots",
            ));
            steps.push(Step::new(
                3,
                "Apply zero product property",
                format!("Set each factor equal to zero: {} = 0", factored),
                "If ab = 0, then a = 0 or b = 0",
            ));
        } else {
            steps.push(Step::new(
                2,
                "Apply the quadratic formula",
                format!(
                    "{} = (-b ± √(b² - 4ac)) / 2a with a = {}, b = {}, c = {}",
                    var,
                    fmt_number(poly.coeff(2)),
                    fmt_number(poly.coeff(1)),
                    fmt_number(poly.coeff(0))
                ),
                "The quadratic formula finds the roots when the expression does not \
                 factor cleanly",
            ));
        }
    } else {
        steps.push(Step::new(
            1,
            "Set up the equation",
            display_eq.clone(),
            "Identify the equation to solve",
        ));
        steps.push(Step::new(
            2,
            format!("Solve for {}", var),
            format!("Apply algebraic operations to isolate {}", var),
            "Use inverse operations to solve for the variable",
        ));
    }

    let final_answer = if roots.is_empty() {
        "No real solutions exist".to_string()
    } else {
        let listed = roots
            .iter()
            .map(|r| format!("{} = {}", var, fmt_number(*r)))
            .collect::<Vec<_>>()
            .join(" or ");
        steps.push(Step::new(
            steps.len() as u32 + 1,
            "Solution",
            listed.clone(),
            "These are the values that satisfy the equation",
        ));
        listed
    };

    StrategyOutcome::Solved(Solution::new(steps, final_answer))
}

/// `a·x + b·y = c`, as matched from problem text.
#[derive(Debug, Clone, Copy)]
struct LinearEq {
    a: f64,
    b: f64,
    c: f64,
}

impl LinearEq {
    fn from_captures(caps: regex::Captures<'_>) -> Option<Self> {
        let a = parse_coeff(caps.get(1)?.as_str())?;
        let sign = if caps.get(2)?.as_str() == "-" { -1.0 } else { 1.0 };
        let b = sign * parse_coeff(caps.get(3)?.as_str())?;
        let c = caps.get(4)?.as_str().parse::<f64>().ok()?;
        if a == 0.0 {
            return None;
        }
        Some(Self { a, b, c })
    }

    fn display(&self) -> String {
        let a = if (self.a - 1.0).abs() < 1e-9 {
            String::new()
        } else {
            fmt_number(self.a)
        };
        let (op, b_mag) = if self.b < 0.0 { ("-", -self.b) } else { ("+", self.b) };
        let b = if (b_mag - 1.0).abs() < 1e-9 {
            String::new()
        } else {
            fmt_number(b_mag)
        };
        format!("{}x {} {}y = {}", a, op, b, fmt_number(self.c))
    }
}

fn parse_coeff(txt: &str) -> Option<f64> {
    match txt {
        "" => Some(1.0),
        "-" => Some(-1.0),
        other => other.parse::<f64>().ok(),
    }
}

/// Solve a 2×2 system by substitution, preserving the fixed four-step
/// narrative: set up → solve (2) for x → substitute into (1) →
/// back-substitute.
fn solve_system(eq1: &LinearEq, eq2: &LinearEq) -> StrategyOutcome {
    let denominator = eq1.b * eq2.a - eq1.a * eq2.b;
    if denominator.abs() < 1e-12 {
        // Parallel or dependent lines; no unique solution to narrate.
        return StrategyOutcome::NeedsFallback;
    }

    let y = (eq1.c * eq2.a - eq1.a * eq2.c) / denominator;
    let x = (eq2.c - eq2.b * y) / eq2.a;

    let x_expr = if (eq2.a - 1.0).abs() < 1e-9 {
        let (op, b_mag) = if eq2.b < 0.0 { ("+", -eq2.b) } else { ("-", eq2.b) };
        let b = if (b_mag - 1.0).abs() < 1e-9 {
            String::new()
        } else {
            fmt_number(b_mag)
        };
        format!("x = {} {} {}y", fmt_number(eq2.c), op, b)
    } else {
        format!(
            "x = ({} - {}y) / {}",
            fmt_number(eq2.c),
            fmt_number(eq2.b),
            fmt_number(eq2.a)
        )
    };

    let steps = vec![
        Step::new(
            1,
            "Set up the system",
            format!("{}  ... (1)\n{}  ... (2)", eq1.display(), eq2.display()),
            "We have a system of two linear equations with two unknowns",
        ),
        Step::new(
            2,
            "Solve equation (2) for x",
            x_expr.clone(),
            "Solve one equation for one variable",
        ),
        Step::new(
            3,
            "Substitute into equation (1)",
            format!("Substituting {} and simplifying: y = {}", x_expr, fmt_number(y)),
            "Substitute the expression for x into the first equation",
        ),
        Step::new(
            4,
            "Back-substitute to find x",
            format!("x = {}", fmt_number(x)),
            format!("Substitute y = {} back into the expression for x", fmt_number(y)),
        ),
    ];

    let final_answer = format!("x = {}, y = {}", fmt_number(x), fmt_number(y));
    StrategyOutcome::Solved(Solution::new(steps, final_answer))
}

/// Pull the equation substring out of surrounding prose.
fn extract_equation(problem: &str, normalized: &str) -> Option<String> {
    for known in KNOWN_QUADRATICS {
        if problem.contains(known) {
            return Some(normalize_notation(known));
        }
    }

    let eq_pos = normalized.find('=')?;
    let expr_char = |c: char| c.is_ascii_alphanumeric() || " .^*+-/()".contains(c);

    // Expand around the '=' over expression characters only, staying on
    // char boundaries (the text may carry π, ∫ and friends).
    let left_start = normalized[..eq_pos]
        .char_indices()
        .rev()
        .find(|(_, c)| !expr_char(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let right_end = normalized[eq_pos + 1..]
        .char_indices()
        .find(|(_, c)| !expr_char(*c))
        .map(|(i, _)| eq_pos + 1 + i)
        .unwrap_or(normalized.len());

    let candidate = normalized[left_start..right_end].trim();
    if candidate.is_empty() || !candidate.contains('=') {
        return None;
    }
    Some(candidate.to_string())
}

/// Parse the left side, dropping leading prose tokens ("solve", "the")
/// until a parsable expression remains.
fn parse_with_prefix_trim(side: &str) -> Option<Polynomial> {
    let mut tokens: Vec<&str> = side.split_whitespace().collect();
    while !tokens.is_empty() {
        if let Ok(p) = Polynomial::parse(&tokens.join(" ")) {
            return Some(p);
        }
        tokens.remove(0);
    }
    None
}
