//! Shared types for mara components.
//!
//! Single source of truth for the data model exchanged between the
//! routing pipeline, the storage layer, and the CLI: problems, solutions,
//! feedback, activity records, and the solve-response envelope.

pub mod activity;
pub mod error;
pub mod feedback;
pub mod problem;
pub mod response;
pub mod solution;

pub use activity::Activity;
pub use error::MaraError;
pub use feedback::{ClarityRating, Feedback};
pub use problem::{Category, Difficulty, Problem, SolutionSource};
pub use response::SolveResponse;
pub use solution::{Solution, SourceRef, Step};

/// Crate version, stamped into status reports and the CLI banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
