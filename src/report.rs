//! report.rs — Output shape of one scoring request.
//!
//! `ScoreReport` is what `compute_scores` returns: the seven subscores, the
//! composite, the coverage metadata and the explanation string. It is fully
//! determined by the input bundle and the scoring config, so two reports for
//! the same input compare equal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregate::Composite;
use crate::subscore::{SubscoreKind, Subscores};

/// Coverage bookkeeping that travels with every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMeta {
    /// Fraction of the seven subscores that could be computed, in [0, 1].
    pub coverage: f64,
    /// `true` for every subscore that was unavailable.
    pub missing: BTreeMap<SubscoreKind, bool>,
    /// Sum of the weights that took part in the composite.
    pub weight_sum_used: f64,
    /// Weighted mean before the coverage penalty and rounding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite_raw: Option<f64>,
}

/// Complete scoring result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub scores: Subscores,
    /// Penalized composite rounded to one decimal; `null` when unavailable.
    pub composite: Option<f64>,
    pub meta: ScoreMeta,
    pub explanation: String,
}

impl ScoreReport {
    pub(crate) fn new(scores: Subscores, agg: Composite, explanation: String) -> Self {
        Self {
            scores,
            composite: agg.composite,
            meta: ScoreMeta {
                coverage: agg.coverage,
                missing: agg.missing,
                weight_sum_used: agg.weight_sum_used,
                composite_raw: agg.composite_raw,
            },
            explanation,
        }
    }

    pub fn coverage(&self) -> f64 {
        self.meta.coverage
    }

    pub fn subscore(&self, kind: SubscoreKind) -> Option<f64> {
        self.scores.get(kind)
    }

    pub fn is_missing(&self, kind: SubscoreKind) -> bool {
        self.meta.missing.get(&kind).copied().unwrap_or(true)
    }

    /// Names of the unavailable subscores, canonical order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        self.meta
            .missing
            .iter()
            .filter(|(_, m)| **m)
            .map(|(k, _)| k.key())
            .collect()
    }
}
