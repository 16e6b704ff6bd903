//! Content guardrails: privacy scan, topic denylist, and mathematical
//! scoring.
//!
//! Validation short-circuits in order: privacy violations first
//! (independent of any mathematical content), then prohibited topics,
//! then an additive mathematical-nature score with a fixed acceptance
//! threshold. Sanitization is a separate operation that strips injection
//! noise while preserving mathematical notation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum additive score for input to count as mathematical.
pub const MATH_CONFIDENCE_THRESHOLD: f64 = 0.3;

/// Keywords that mark input as mathematical.
const MATH_KEYWORDS: &[&str] = &[
    "equation", "derivative", "integral", "function", "solve", "calculate", "find",
    "algebra", "calculus", "geometry", "trigonometry", "statistics", "probability",
    "matrix", "vector", "polynomial", "logarithm", "exponential", "limit",
    "theorem", "proof", "formula", "graph", "plot", "coordinate", "angle",
    "triangle", "circle", "square", "rectangle", "area", "volume", "perimeter",
    "differential", "integration", "optimization", "linear", "quadratic",
    "sine", "cosine", "tangent", "pi", "infinity", "complex", "rational",
];

/// Topics that are never educational math content.
const PROHIBITED_KEYWORDS: &[&str] = &[
    "politics", "religion", "personal information", "medical diagnosis",
    "legal advice", "financial advice", "inappropriate", "offensive",
    "violent", "sexual", "drugs", "weapons", "illegal", "harmful",
    "social security", "credit card", "password", "private key",
];

/// Privacy-sensitive patterns: SSN, credit card, email, phone.
static PRIVACY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b\d{3}-\d{2}-\d{4}\b",
        r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b",
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        r"\b\d{3}[\s-]?\d{3}[\s-]?\d{4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("privacy pattern compiles"))
    .collect()
});

static MATH_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+\-*/=<>∫∑∏√∞π∂∇±×÷≤≥≠≈∈∅∪∩]").expect("symbol pattern compiles"));

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("number pattern compiles"));

static VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]\b").expect("variable pattern compiles"));

static EXPRESSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]\s*[\+\-\*/\^]\s*[a-z0-9]").expect("expression pattern compiles"));

static PROBLEM_LANGUAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(solve|find|calculate|compute|determine)").expect("language pattern compiles"));

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script.*?</script>").expect("script pattern compiles"));

static SQL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(union|select|insert|update|delete|drop|create|alter)\s+",
        r"(?i)(or|and)\s+1\s*=\s*1",
        r"(?i)(or|and)\s+1\s*=\s*0",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("sql pattern compiles"))
    .collect()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Which class of rule rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Privacy,
    Content,
    NonMathematical,
}

/// Which scoring signals fired for valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    Keywords,
    Symbols,
    VariablesNumbers,
    Expressions,
    ProblemLanguage,
}

/// Outcome of content validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Valid {
        confidence: f64,
        categories: Vec<SignalCategory>,
    },
    Rejected {
        kind: ViolationKind,
        reason: String,
    },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }
}

/// Table sizes for the status surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailsStatus {
    pub active: bool,
    pub keywords: usize,
    pub prohibited_categories: usize,
    pub privacy_patterns: usize,
}

/// Validate raw input. Short-circuits on privacy, then prohibited
/// content, then scores mathematical nature.
pub fn validate(text: &str) -> Verdict {
    let lower = text.to_lowercase();

    if PRIVACY_PATTERNS.iter().any(|p| p.is_match(text)) {
        return Verdict::Rejected {
            kind: ViolationKind::Privacy,
            reason: "Input contains sensitive personal information. Please remove any \
                     personal data and try again."
                .to_string(),
        };
    }

    if PROHIBITED_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Verdict::Rejected {
            kind: ViolationKind::Content,
            reason: "Content appears to be non-educational or inappropriate. Please \
                     enter a mathematical problem."
                .to_string(),
        };
    }

    let (confidence, categories) = score_mathematical_nature(text, &lower);
    if confidence >= MATH_CONFIDENCE_THRESHOLD {
        Verdict::Valid {
            confidence,
            categories,
        }
    } else {
        Verdict::Rejected {
            kind: ViolationKind::NonMathematical,
            reason: "This doesn't appear to be a mathematical problem. Please enter a \
                     question related to mathematics, such as equations, calculus, \
                     geometry, or algebra."
                .to_string(),
        }
    }
}

/// Additive scoring over independent signals, capped at 1.0.
fn score_mathematical_nature(original: &str, lower: &str) -> (f64, Vec<SignalCategory>) {
    let mut confidence = 0.0;
    let mut categories = Vec::new();

    if MATH_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        confidence += 0.4;
        categories.push(SignalCategory::Keywords);
    }

    if MATH_SYMBOL_RE.is_match(original) {
        confidence += 0.3;
        categories.push(SignalCategory::Symbols);
    }

    if NUMBER_RE.is_match(original) && VARIABLE_RE.is_match(lower) {
        confidence += 0.2;
        categories.push(SignalCategory::VariablesNumbers);
    }

    if EXPRESSION_RE.is_match(lower) {
        confidence += 0.1;
        categories.push(SignalCategory::Expressions);
    }

    if PROBLEM_LANGUAGE_RE.is_match(lower) {
        confidence += 0.1;
        categories.push(SignalCategory::ProblemLanguage);
    }

    (f64::min(confidence, 1.0), categories)
}

/// Strip injection noise and collapse whitespace. Mathematical notation
/// (operators, Greek letters, superscripts) passes through untouched.
pub fn sanitize(text: &str) -> String {
    let mut sanitized = SCRIPT_RE.replace_all(text, "").into_owned();
    for pattern in SQL_PATTERNS.iter() {
        sanitized = pattern.replace_all(&sanitized, "").into_owned();
    }
    WHITESPACE_RE.replace_all(&sanitized, " ").trim().to_string()
}

pub fn status() -> GuardrailsStatus {
    GuardrailsStatus {
        active: true,
        keywords: MATH_KEYWORDS.len(),
        prohibited_categories: PROHIBITED_KEYWORDS.len(),
        privacy_patterns: PRIVACY_PATTERNS.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssn_rejects_regardless_of_math_content() {
        let verdict = validate("solve x^2 = 4 for my SSN 123-45-6789");
        match verdict {
            Verdict::Rejected { kind, .. } => assert_eq!(kind, ViolationKind::Privacy),
            _ => panic!("expected privacy rejection"),
        }
    }

    #[test]
    fn email_and_phone_reject() {
        assert!(!validate("mail me at alice@example.com").is_valid());
        assert!(!validate("call 555-123-4567 about the integral").is_valid());
    }

    #[test]
    fn prohibited_topics_reject() {
        let verdict = validate("give me legal advice about probability");
        match verdict {
            Verdict::Rejected { kind, .. } => assert_eq!(kind, ViolationKind::Content),
            _ => panic!("expected content rejection"),
        }
    }

    #[test]
    fn non_math_text_falls_below_threshold() {
        let verdict = validate("hello there");
        match verdict {
            Verdict::Rejected { kind, .. } => {
                assert_eq!(kind, ViolationKind::NonMathematical)
            }
            _ => panic!("expected non-mathematical rejection"),
        }
    }

    #[test]
    fn two_independent_signals_pass() {
        // Keyword + problem language, no symbols or numbers.
        let verdict = validate("find the derivative please");
        match verdict {
            Verdict::Valid {
                confidence,
                categories,
            } => {
                assert!(confidence >= MATH_CONFIDENCE_THRESHOLD);
                assert!(categories.contains(&SignalCategory::Keywords));
                assert!(categories.contains(&SignalCategory::ProblemLanguage));
            }
            _ => panic!("expected valid verdict"),
        }
    }

    #[test]
    fn quadratic_scores_all_major_signals() {
        let verdict = validate("solve x^2 + 5x + 6 = 0");
        match verdict {
            Verdict::Valid {
                confidence,
                categories,
            } => {
                assert!(confidence >= 0.9);
                assert!(categories.contains(&SignalCategory::Symbols));
                assert!(categories.contains(&SignalCategory::VariablesNumbers));
                assert!(categories.contains(&SignalCategory::Expressions));
            }
            _ => panic!("expected valid verdict"),
        }
    }

    #[test]
    fn confidence_caps_at_one() {
        if let Verdict::Valid { confidence, .. } =
            validate("solve the quadratic equation x^2 + 5x + 6 = 0 and find x")
        {
            assert!(confidence <= 1.0);
        } else {
            panic!("expected valid verdict");
        }
    }

    #[test]
    fn sanitize_strips_scripts_and_sql() {
        let cleaned = sanitize("<script>alert(1)</script>solve   x = 1 or 1 = 1");
        assert!(!cleaned.contains("script"));
        assert!(!cleaned.contains("1 = 1"));
        assert!(cleaned.contains("x = 1"));
    }

    #[test]
    fn sanitize_preserves_math_notation() {
        let cleaned = sanitize("∫ 2x dx  and  π/4 ≈ 0.785, x² too");
        assert!(cleaned.contains('∫'));
        assert!(cleaned.contains("π/4"));
        assert!(cleaned.contains('²'));
        // Whitespace collapsed.
        assert!(!cleaned.contains("  "));
    }

    #[test]
    fn status_reports_table_sizes() {
        let s = status();
        assert!(s.active);
        assert_eq!(s.privacy_patterns, 4);
        assert!(s.keywords > 30);
    }
}
