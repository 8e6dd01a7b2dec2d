//! Composite weights per subscore.
//!
//! JSON shape (TOML is the same keys under `[weights]` in the scoring config):
//! {
//!   "innovation": 0.18,
//!   "product_momentum": 0.18,
//!   "financial_quality": 0.22,
//!   "brand_clout": 0.12,
//!   "market_momentum": 0.10,
//!   "talent_demand": 0.12,
//!   "ethics_risk": 0.08
//! }
//!
//! Unknown keys are rejected when decoding; `validate()` checks the values.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::subscore::SubscoreKind;

/// Accepted distance of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightTable {
    pub innovation: f64,
    pub product_momentum: f64,
    pub financial_quality: f64,
    pub brand_clout: f64,
    pub market_momentum: f64,
    pub talent_demand: f64,
    pub ethics_risk: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            innovation: 0.18,
            product_momentum: 0.18,
            financial_quality: 0.22,
            brand_clout: 0.12,
            market_momentum: 0.10,
            talent_demand: 0.12,
            ethics_risk: 0.08,
        }
    }
}

impl WeightTable {
    pub fn get(&self, kind: SubscoreKind) -> f64 {
        match kind {
            SubscoreKind::Innovation => self.innovation,
            SubscoreKind::ProductMomentum => self.product_momentum,
            SubscoreKind::FinancialQuality => self.financial_quality,
            SubscoreKind::BrandClout => self.brand_clout,
            SubscoreKind::MarketMomentum => self.market_momentum,
            SubscoreKind::TalentDemand => self.talent_demand,
            SubscoreKind::EthicsRisk => self.ethics_risk,
        }
    }

    pub fn sum(&self) -> f64 {
        SubscoreKind::ALL.iter().map(|&k| self.get(k)).sum()
    }

    /// Every weight finite and non-negative, total within tolerance of 1.0.
    pub fn validate(&self) -> Result<()> {
        for k in SubscoreKind::ALL {
            let w = self.get(k);
            if !w.is_finite() || w < 0.0 {
                bail!("weight for {k} must be a finite non-negative number, got {w}");
            }
        }
        let total = self.sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            bail!("weights must sum to 1.0, got {total:.4}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_sum_to_one() {
        let w = WeightTable::default();
        w.validate().unwrap();
        assert!((w.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_sum() {
        let w = WeightTable {
            innovation: 0.5,
            ..WeightTable::default()
        };
        let err = w.validate().unwrap_err().to_string();
        assert!(err.contains("sum to 1.0"), "{err}");
    }

    #[test]
    fn rejects_negative_and_nan() {
        let w = WeightTable {
            innovation: -0.1,
            product_momentum: 0.46,
            ..WeightTable::default()
        };
        assert!(w.validate().is_err());

        let w = WeightTable {
            ethics_risk: f64::NAN,
            ..WeightTable::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn rejects_unknown_key() {
        let json = r#"{"innovation":0.18,"product_momentum":0.18,"financial_quality":0.22,
            "brand_clout":0.12,"market_momentum":0.10,"talent_demand":0.12,"ethics_risk":0.08,
            "vibes":0.0}"#;
        assert!(serde_json::from_str::<WeightTable>(json).is_err());
    }
}
