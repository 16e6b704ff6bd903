//! mara daemon library - exposes the routing pipeline for testing.
//!
//! The pipeline, leaf-first: `guardrails` (content validation),
//! `router` (category + difficulty classification), `solver` (strategy
//! table over a small symbolic engine), `knowledge` (TF-IDF retrieval),
//! `websearch` (provider fallback + synthesis), `storage` and `feedback`
//! (collaborator state), all wired together by `orchestrator`.

pub mod config;
pub mod feedback;
pub mod guardrails;
pub mod knowledge;
pub mod orchestrator;
pub mod router;
pub mod solver;
pub mod storage;
pub mod websearch;
