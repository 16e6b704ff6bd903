//! Append-only audit log entries.
//!
//! One record per pipeline transition: submission, success, failure,
//! fallback, feedback. Never mutated or deleted; queried newest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    /// What happened, e.g. "Problem submitted", "Solution found".
    pub action: String,
    /// Which component it happened in, e.g. "user_input", "math_solver".
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        action: impl Into<String>,
        source: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: action.into(),
            source: source.into(),
            detail,
            created_at: Utc::now(),
        }
    }
}
