//! Minimal symbolic engine for single-variable polynomials.
//!
//! Covers the expression shapes the solving strategies need: parsing
//! (after exponent-notation normalization), differentiation, power-rule
//! integration, linear/quadratic root finding, and factored-form display
//! for nicely factorable quadratics. Anything outside this surface is a
//! `ParseError`, which strategies translate into a fallback signal.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("unsupported term: {0}")]
    UnsupportedTerm(String),
    #[error("more than one variable")]
    MultipleVariables,
}

static TERM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<coeff>-?\d*\.?\d*)\*?(?:(?P<var>[a-z])(?:\^(?P<exp>\d+))?)?$")
        .expect("term pattern compiles")
});

/// Normalize exponent notation before parsing: unicode superscripts and
/// Python-style `**` both become caret powers. Must run before any
/// symbolic parse.
pub fn normalize_notation(expr: &str) -> String {
    expr.replace('²', "^2")
        .replace('³', "^3")
        .replace("**", "^")
}

/// Dense single-variable polynomial; `coeffs[i]` is the coefficient of
/// `x^i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
    var: char,
}

impl Polynomial {
    pub fn from_coeffs(coeffs: Vec<f64>, var: char) -> Self {
        let mut p = Self { coeffs, var };
        p.trim();
        p
    }

    /// Parse a textual expression such as `3x^3 + 2x^2 - 5x + 1`.
    pub fn parse(expr: &str) -> Result<Self, ParseError> {
        let normalized: String = normalize_notation(expr)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if normalized.is_empty() {
            return Err(ParseError::Empty);
        }

        // Split into signed terms; a leading sign belongs to the first
        // term.
        let marked = normalized.replace('-', "+-");
        let mut coeffs: Vec<f64> = Vec::new();
        let mut var: Option<char> = None;
        let mut saw_term = false;

        for term in marked.split('+') {
            if term.is_empty() {
                continue;
            }
            let term_lower = term.to_lowercase();
            let caps = TERM_RE
                .captures(&term_lower)
                .ok_or_else(|| ParseError::UnsupportedTerm(term.to_string()))?;

            let coeff_txt = caps.name("coeff").map(|m| m.as_str()).unwrap_or("");
            let var_txt = caps.name("var").map(|m| m.as_str());
            let exp_txt = caps.name("exp").map(|m| m.as_str());

            let coeff = match coeff_txt {
                "" => {
                    if var_txt.is_none() {
                        return Err(ParseError::UnsupportedTerm(term.to_string()));
                    }
                    1.0
                }
                "-" => -1.0,
                other => other
                    .parse::<f64>()
                    .map_err(|_| ParseError::UnsupportedTerm(term.to_string()))?,
            };

            let exp = match (var_txt, exp_txt) {
                (None, _) => 0,
                (Some(v), exp) => {
                    let v = v
                        .chars()
                        .next()
                        .ok_or_else(|| ParseError::UnsupportedTerm(term.to_string()))?;
                    match var {
                        None => var = Some(v),
                        Some(seen) if seen != v => return Err(ParseError::MultipleVariables),
                        Some(_) => {}
                    }
                    match exp {
                        None => 1,
                        Some(e) => e
                            .parse::<usize>()
                            .map_err(|_| ParseError::UnsupportedTerm(term.to_string()))?,
                    }
                }
            };

            if coeffs.len() <= exp {
                coeffs.resize(exp + 1, 0.0);
            }
            coeffs[exp] += coeff;
            saw_term = true;
        }

        if !saw_term {
            return Err(ParseError::Empty);
        }

        Ok(Self::from_coeffs(coeffs, var.unwrap_or('x')))
    }

    fn trim(&mut self) {
        while self.coeffs.len() > 1 && self.coeffs.last() == Some(&0.0) {
            self.coeffs.pop();
        }
        if self.coeffs.is_empty() {
            self.coeffs.push(0.0);
        }
    }

    pub fn var(&self) -> char {
        self.var
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn coeff(&self, power: usize) -> f64 {
        self.coeffs.get(power).copied().unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| *c == 0.0)
    }

    /// `self - other`, used to move an equation onto one side.
    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| self.coeff(i) - other.coeff(i))
            .collect();
        Polynomial::from_coeffs(coeffs, self.var)
    }

    /// Power rule, term by term.
    pub fn differentiate(&self) -> Polynomial {
        if self.degree() == 0 {
            return Polynomial::from_coeffs(vec![0.0], self.var);
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, c)| c * power as f64)
            .collect();
        Polynomial::from_coeffs(coeffs, self.var)
    }

    /// Antiderivative with zero constant term; callers append `+ C`.
    pub fn integrate(&self) -> Polynomial {
        let mut coeffs = vec![0.0];
        coeffs.extend(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(power, c)| c / (power as f64 + 1.0)),
        );
        Polynomial::from_coeffs(coeffs, self.var)
    }

    /// Real roots for degree ≤ 2. Returns `None` for higher degrees,
    /// an empty vec when no real root exists.
    pub fn real_roots(&self) -> Option<Vec<f64>> {
        match self.degree() {
            0 => Some(Vec::new()),
            1 => {
                let (b, a) = (self.coeff(0), self.coeff(1));
                Some(vec![-b / a])
            }
            2 => {
                let (c, b, a) = (self.coeff(0), self.coeff(1), self.coeff(2));
                let discriminant = b * b - 4.0 * a * c;
                if discriminant < 0.0 {
                    Some(Vec::new())
                } else if discriminant == 0.0 {
                    Some(vec![-b / (2.0 * a)])
                } else {
                    let sqrt_d = discriminant.sqrt();
                    Some(vec![(-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a)])
                }
            }
            _ => None,
        }
    }

    /// `(x + 2)(x + 3)` display for monic quadratics with integer roots.
    pub fn factored_form(&self) -> Option<String> {
        if self.degree() != 2 || (self.coeff(2) - 1.0).abs() > 1e-9 {
            return None;
        }
        let roots = self.real_roots()?;
        if roots.len() != 2 || roots.iter().any(|r| (r - r.round()).abs() > 1e-9) {
            return None;
        }
        let factor = |root: f64| {
            let offset = -root.round();
            if offset >= 0.0 {
                format!("({} + {})", self.var, fmt_number(offset))
            } else {
                format!("({} - {})", self.var, fmt_number(-offset))
            }
        };
        Some(format!("{}{}", factor(roots[0]), factor(roots[1])))
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for power in (0..self.coeffs.len()).rev() {
            let c = self.coeff(power);
            if c == 0.0 {
                continue;
            }

            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
                first = false;
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }

            let magnitude = c.abs();
            let elide_coeff = power > 0 && (magnitude - 1.0).abs() < 1e-12;
            if !elide_coeff {
                write!(f, "{}", fmt_number(magnitude))?;
            }
            match power {
                0 => {}
                1 => write!(f, "{}", self.var)?,
                _ => write!(f, "{}^{}", self.var, power)?,
            }
        }
        Ok(())
    }
}

/// Render a float without a trailing fraction when it is (numerically)
/// an integer; otherwise with two decimals.
pub fn fmt_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_standard_quadratic() {
        let p = Polynomial::parse("x^2 + 5x + 6").unwrap();
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coeff(2), 1.0);
        assert_eq!(p.coeff(1), 5.0);
        assert_eq!(p.coeff(0), 6.0);
    }

    #[test]
    fn parses_unicode_and_python_exponents() {
        let a = Polynomial::parse("x² + 5x + 6").unwrap();
        let b = Polynomial::parse("x**2 + 5x + 6").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parses_negative_and_implicit_coefficients() {
        let p = Polynomial::parse("-x^2 - 5").unwrap();
        assert_eq!(p.coeff(2), -1.0);
        assert_eq!(p.coeff(0), -5.0);
    }

    #[test]
    fn rejects_multi_variable_terms() {
        assert_eq!(
            Polynomial::parse("2x + 3y"),
            Err(ParseError::MultipleVariables)
        );
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert!(matches!(
            Polynomial::parse("ln(x)"),
            Err(ParseError::UnsupportedTerm(_))
        ));
        assert_eq!(Polynomial::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn differentiates_by_power_rule() {
        let p = Polynomial::parse("3x^3 + 2x^2 - 5x + 1").unwrap();
        assert_eq!(p.differentiate().to_string(), "9x^2 + 4x - 5");
    }

    #[test]
    fn integrates_linear_term() {
        let p = Polynomial::parse("2x").unwrap();
        assert_eq!(p.integrate().to_string(), "x^2");
    }

    #[test]
    fn quadratic_roots_in_formula_order() {
        let p = Polynomial::parse("x^2 + 5x + 6").unwrap();
        let roots = p.real_roots().unwrap();
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0], -2.0, epsilon = 1e-9);
        assert_relative_eq!(roots[1], -3.0, epsilon = 1e-9);
    }

    #[test]
    fn no_real_roots_for_positive_definite() {
        let p = Polynomial::parse("x^2 + 1").unwrap();
        assert!(p.real_roots().unwrap().is_empty());
    }

    #[test]
    fn linear_root() {
        let p = Polynomial::parse("2x - 8").unwrap();
        let roots = p.real_roots().unwrap();
        assert_relative_eq!(roots[0], 4.0, epsilon = 1e-9);
    }

    #[test]
    fn factored_form_of_monic_quadratic() {
        let p = Polynomial::parse("x^2 + 5x + 6").unwrap();
        assert_eq!(p.factored_form().unwrap(), "(x + 2)(x + 3)");

        let q = Polynomial::parse("x^2 - 4").unwrap();
        assert_eq!(q.factored_form().unwrap(), "(x - 2)(x + 2)");
    }

    #[test]
    fn display_elides_unit_coefficients() {
        let p = Polynomial::parse("x^2 - x + 1").unwrap();
        assert_eq!(p.to_string(), "x^2 - x + 1");
    }
}
