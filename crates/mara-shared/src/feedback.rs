//! User feedback on delivered solutions.

use crate::error::MaraError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How clear the user found the explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClarityRating {
    #[serde(rename = "Very Clear")]
    VeryClear,
    #[serde(rename = "Somewhat Clear")]
    SomewhatClear,
    #[serde(rename = "Unclear")]
    Unclear,
}

impl std::fmt::Display for ClarityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ClarityRating::VeryClear => "Very Clear",
            ClarityRating::SomewhatClear => "Somewhat Clear",
            ClarityRating::Unclear => "Unclear",
        };
        write!(f, "{}", s)
    }
}

/// Immutable feedback entry, weakly referencing a problem by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    /// Weak reference; the problem may already be archived.
    pub problem_id: Uuid,
    /// Accuracy rating, 1 (wrong) to 5 (exact).
    pub accuracy_rating: u8,
    pub clarity_rating: ClarityRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub is_helpful: bool,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Construct a feedback entry, rejecting out-of-range accuracy
    /// ratings.
    pub fn new(
        problem_id: Uuid,
        accuracy_rating: u8,
        clarity_rating: ClarityRating,
        comments: Option<String>,
        is_helpful: bool,
    ) -> Result<Self, MaraError> {
        if !(1..=5).contains(&accuracy_rating) {
            return Err(MaraError::InvalidInput {
                reason: format!(
                    "accuracy rating must be between 1 and 5, got {}",
                    accuracy_rating
                ),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            problem_id,
            accuracy_rating,
            clarity_rating,
            comments,
            is_helpful,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_ratings() {
        let pid = Uuid::new_v4();
        assert!(Feedback::new(pid, 0, ClarityRating::Unclear, None, false).is_err());
        assert!(Feedback::new(pid, 6, ClarityRating::VeryClear, None, true).is_err());
        assert!(Feedback::new(pid, 3, ClarityRating::SomewhatClear, None, true).is_ok());
    }

    #[test]
    fn clarity_serializes_with_spaces() {
        assert_eq!(
            serde_json::to_value(ClarityRating::VeryClear).unwrap(),
            "Very Clear"
        );
        assert_eq!(
            serde_json::to_value(ClarityRating::SomewhatClear).unwrap(),
            "Somewhat Clear"
        );
    }
}
