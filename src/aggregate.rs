//! # Composite Aggregator
//! Pure, testable logic that maps `Subscores` → composite + coverage + explanation.
//! No I/O; never fails.
//!
//! Policy: weights are renormalized over the subscores actually present so the
//! weighted mean stays well-defined, then the result is discounted by a mild
//! coverage penalty `(1 - P + P * coverage)` and rounded to one decimal.

use std::collections::BTreeMap;

use crate::subscore::{SubscoreKind, Subscores};
use crate::weights::WeightTable;

/// Aggregation output, before it is wrapped into a `ScoreReport`.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    /// Rounded, penalized composite. `None` when nothing was available.
    pub composite: Option<f64>,
    /// Renormalized weighted mean, no penalty, no rounding.
    pub composite_raw: Option<f64>,
    /// available / 7
    pub coverage: f64,
    /// Sum of the weights of the available subscores.
    pub weight_sum_used: f64,
    /// Canonical order, `true` when the subscore was unavailable.
    pub missing: BTreeMap<SubscoreKind, bool>,
}

pub fn aggregate(subs: &Subscores, weights: &WeightTable, penalty: f64) -> Composite {
    let missing = SubscoreKind::ALL
        .into_iter()
        .map(|k| (k, subs.get(k).is_none()))
        .collect::<BTreeMap<_, _>>();

    let available: Vec<(SubscoreKind, f64)> = subs.available().collect();
    if available.is_empty() {
        return Composite {
            composite: None,
            composite_raw: None,
            coverage: 0.0,
            weight_sum_used: 0.0,
            missing,
        };
    }

    let coverage = available.len() as f64 / SubscoreKind::COUNT as f64;
    let weight_sum: f64 = available.iter().map(|(k, _)| weights.get(*k)).sum();

    // All present subscores weighted zero: nothing to renormalize against.
    let composite_raw = if weight_sum > 0.0 {
        Some(
            available
                .iter()
                .map(|(k, v)| v * (weights.get(*k) / weight_sum))
                .sum::<f64>(),
        )
    } else {
        None
    };

    let composite = composite_raw.map(|raw| round1(raw * coverage_factor(penalty, coverage)));

    Composite {
        composite,
        composite_raw,
        coverage,
        weight_sum_used: weight_sum,
        missing,
    }
}

/// Multiplier applied to the raw composite. Non-decreasing in `coverage` for
/// any penalty in [0, 1]; equals 1.0 at full coverage.
pub fn coverage_factor(penalty: f64, coverage: f64) -> f64 {
    1.0 - penalty + penalty * coverage.clamp(0.0, 1.0)
}

/// One decimal, ties to even on the exact binary value (`0.25` → `0.2`).
pub fn round1(x: f64) -> f64 {
    format!("{x:.1}").parse().unwrap_or(x)
}

/// Deterministic one-line summary:
/// `Composite 63.4 with 28% data coverage. | Financial quality 75 | Ethics/risk 60 | Missing: innovation, ...`
pub fn explain(subs: &Subscores, agg: &Composite) -> String {
    let mut pieces = Vec::with_capacity(SubscoreKind::COUNT + 2);

    match agg.composite {
        Some(c) => pieces.push(format!(
            "Composite {c:.1} with {}% data coverage.",
            coverage_percent(agg.coverage)
        )),
        None => pieces.push("Composite unavailable (insufficient data).".to_string()),
    }

    for (kind, value) in subs.available() {
        pieces.push(format!("{} {value:.0}", kind.label()));
    }

    let missing: Vec<&str> = agg
        .missing
        .iter()
        .filter(|(_, m)| **m)
        .map(|(k, _)| k.key())
        .collect();
    if !missing.is_empty() {
        pieces.push(format!("Missing: {}", missing.join(", ")));
    }

    pieces.join(" | ")
}

/// Whole percent, truncated (2/7 → 28).
fn coverage_percent(coverage: f64) -> u32 {
    (coverage * 100.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(pairs: &[(SubscoreKind, f64)]) -> Subscores {
        let mut s = Subscores::default();
        for &(k, v) in pairs {
            s.set(k, Some(v));
        }
        s
    }

    #[test]
    fn nothing_available() {
        let agg = aggregate(&Subscores::default(), &WeightTable::default(), 0.15);
        assert_eq!(agg.composite, None);
        assert_eq!(agg.coverage, 0.0);
        assert!(agg.missing.values().all(|&m| m));
    }

    #[test]
    fn renormalizes_over_present_subscores() {
        let s = only(&[
            (SubscoreKind::FinancialQuality, 75.0),
            (SubscoreKind::EthicsRisk, 60.0),
        ]);
        let agg = aggregate(&s, &WeightTable::default(), 0.15);
        assert!((agg.weight_sum_used - 0.30).abs() < 1e-12);
        assert!((agg.composite_raw.unwrap() - 71.0).abs() < 1e-9);
        assert!((agg.coverage - 2.0 / 7.0).abs() < 1e-12);
        assert_eq!(agg.composite, Some(63.4));
    }

    #[test]
    fn full_coverage_has_no_penalty() {
        let s = only(&SubscoreKind::ALL.map(|k| (k, 80.0)));
        let agg = aggregate(&s, &WeightTable::default(), 0.15);
        assert_eq!(agg.coverage, 1.0);
        assert_eq!(agg.composite, Some(80.0));
    }

    #[test]
    fn zero_penalty_keeps_raw_mean() {
        let s = only(&[(SubscoreKind::TalentDemand, 42.0)]);
        let agg = aggregate(&s, &WeightTable::default(), 0.0);
        assert_eq!(agg.composite, Some(42.0));
    }

    #[test]
    fn zero_weight_only_subscores_have_no_composite() {
        let w = WeightTable {
            innovation: 0.0,
            product_momentum: 0.36,
            ..WeightTable::default()
        };
        let s = only(&[(SubscoreKind::Innovation, 90.0)]);
        let agg = aggregate(&s, &w, 0.15);
        assert_eq!(agg.composite, None);
        assert!(agg.coverage > 0.0);
    }

    #[test]
    fn coverage_factor_monotonic() {
        let mut prev = coverage_factor(0.15, 0.0);
        assert!((prev - 0.85).abs() < 1e-12);
        for i in 1..=7 {
            let f = coverage_factor(0.15, i as f64 / 7.0);
            assert!(f >= prev);
            prev = f;
        }
        assert!((prev - 1.0).abs() < 1e-12);
    }

    #[test]
    fn round1_ties_to_even() {
        assert_eq!(round1(63.392857), 63.4);
        assert_eq!(round1(0.25), 0.2);
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(71.0), 71.0);
    }

    #[test]
    fn explanation_half_values_round_to_even() {
        let s = only(&[
            (SubscoreKind::ProductMomentum, 12.5),
            (SubscoreKind::TalentDemand, 37.5),
        ]);
        let agg = aggregate(&s, &WeightTable::default(), 0.15);
        let text = explain(&s, &agg);
        assert!(text.contains("| Product momentum 12 |"), "{text}");
        assert!(text.contains("| Talent demand 38 |"), "{text}");
    }

    #[test]
    fn explanation_order_and_missing_list() {
        let s = only(&[
            (SubscoreKind::EthicsRisk, 60.0),
            (SubscoreKind::FinancialQuality, 75.0),
        ]);
        let agg = aggregate(&s, &WeightTable::default(), 0.15);
        let text = explain(&s, &agg);
        assert_eq!(
            text,
            "Composite 63.4 with 28% data coverage. | Financial quality 75 | Ethics/risk 60 | \
             Missing: innovation, product_momentum, brand_clout, market_momentum, talent_demand"
        );
    }

    #[test]
    fn explanation_without_composite() {
        let agg = aggregate(&Subscores::default(), &WeightTable::default(), 0.15);
        let text = explain(&Subscores::default(), &agg);
        assert!(text.starts_with("Composite unavailable (insufficient data)."));
        assert!(text.ends_with(
            "Missing: innovation, product_momentum, financial_quality, brand_clout, \
             market_momentum, talent_demand, ethics_risk"
        ));
    }

    #[test]
    fn full_coverage_explanation_has_no_missing_section() {
        let s = only(&SubscoreKind::ALL.map(|k| (k, 49.6)));
        let agg = aggregate(&s, &WeightTable::default(), 0.15);
        let text = explain(&s, &agg);
        assert!(text.contains("100% data coverage"));
        assert!(text.contains("Innovation 50"));
        assert!(!text.contains("Missing"));
    }
}
