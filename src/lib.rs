// src/lib.rs
//! Company scorecard: turns already-fetched public signals (financials, news,
//! jobs, code activity) into seven 0–100 subscores and a coverage-aware
//! composite.
//!
//! The pipeline is a pure function of its input bundle. Fetching, caching and
//! transport live outside this crate.

pub mod aggregate;
pub mod company;
pub mod config;
pub mod engine;
pub mod normalize;
pub mod report;
pub mod scorecard;
pub mod signals;
pub mod subscore;
pub mod weights;

// ---- Re-exports for stable public API ----
pub use crate::company::{resolve_company, CompanyProfile};
pub use crate::config::{load_config_default, load_config_from, ScoringConfig};
pub use crate::engine::ScoringEngine;
pub use crate::report::{ScoreMeta, ScoreReport};
pub use crate::scorecard::{build_scorecard, build_scorecard_with, Scorecard, SourcePresence};
pub use crate::signals::{
    CodeActivitySignals, FinancialSignals, JobSignals, NewsSignals, RawSignalBundle,
};
pub use crate::subscore::{SubscoreKind, Subscores};
pub use crate::weights::WeightTable;

/// Score one bundle with the built-in weights and coverage penalty.
///
/// Synchronous and side-effect free apart from `tracing`/`metrics` emission;
/// safe to call from any number of threads at once.
pub fn compute_scores(bundle: &RawSignalBundle) -> ScoreReport {
    ScoringEngine::default().compute(bundle)
}
