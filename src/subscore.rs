//! # Subscores
//! The seven named 0–100 signals that make up a scorecard.
//!
//! `SubscoreKind::ALL` is the canonical order used everywhere a report is
//! listed: explanation text, the `missing` map and serialized output.

use serde::{Deserialize, Serialize};

/// One of the seven scorecard dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscoreKind {
    Innovation,
    ProductMomentum,
    FinancialQuality,
    BrandClout,
    MarketMomentum,
    TalentDemand,
    EthicsRisk,
}

impl SubscoreKind {
    /// Canonical listing order.
    pub const ALL: [SubscoreKind; 7] = [
        SubscoreKind::Innovation,
        SubscoreKind::ProductMomentum,
        SubscoreKind::FinancialQuality,
        SubscoreKind::BrandClout,
        SubscoreKind::MarketMomentum,
        SubscoreKind::TalentDemand,
        SubscoreKind::EthicsRisk,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Machine key (`snake_case`), matches the serde name.
    pub fn key(self) -> &'static str {
        match self {
            SubscoreKind::Innovation => "innovation",
            SubscoreKind::ProductMomentum => "product_momentum",
            SubscoreKind::FinancialQuality => "financial_quality",
            SubscoreKind::BrandClout => "brand_clout",
            SubscoreKind::MarketMomentum => "market_momentum",
            SubscoreKind::TalentDemand => "talent_demand",
            SubscoreKind::EthicsRisk => "ethics_risk",
        }
    }

    /// Human label used in explanations.
    pub fn label(self) -> &'static str {
        match self {
            SubscoreKind::Innovation => "Innovation",
            SubscoreKind::ProductMomentum => "Product momentum",
            SubscoreKind::FinancialQuality => "Financial quality",
            SubscoreKind::BrandClout => "Brand clout",
            SubscoreKind::MarketMomentum => "Market momentum",
            SubscoreKind::TalentDemand => "Talent demand",
            SubscoreKind::EthicsRisk => "Ethics/risk",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for SubscoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// All seven subscores of one report. `None` means "unavailable", which is
/// never the same thing as a score of zero.
///
/// Serializes as a map in canonical order with `null` for unavailable entries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Subscores {
    #[serde(default)]
    pub innovation: Option<f64>,
    #[serde(default)]
    pub product_momentum: Option<f64>,
    #[serde(default)]
    pub financial_quality: Option<f64>,
    #[serde(default)]
    pub brand_clout: Option<f64>,
    #[serde(default)]
    pub market_momentum: Option<f64>,
    #[serde(default)]
    pub talent_demand: Option<f64>,
    #[serde(default)]
    pub ethics_risk: Option<f64>,
}

impl Subscores {
    pub fn get(&self, kind: SubscoreKind) -> Option<f64> {
        self.as_array()[kind.index()]
    }

    pub fn set(&mut self, kind: SubscoreKind, value: Option<f64>) {
        let slot = match kind {
            SubscoreKind::Innovation => &mut self.innovation,
            SubscoreKind::ProductMomentum => &mut self.product_momentum,
            SubscoreKind::FinancialQuality => &mut self.financial_quality,
            SubscoreKind::BrandClout => &mut self.brand_clout,
            SubscoreKind::MarketMomentum => &mut self.market_momentum,
            SubscoreKind::TalentDemand => &mut self.talent_demand,
            SubscoreKind::EthicsRisk => &mut self.ethics_risk,
        };
        *slot = value;
    }

    /// `(kind, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (SubscoreKind, Option<f64>)> + '_ {
        SubscoreKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// Only the subscores that could be computed.
    pub fn available(&self) -> impl Iterator<Item = (SubscoreKind, f64)> + '_ {
        self.iter().filter_map(|(k, v)| v.map(|v| (k, v)))
    }

    pub fn available_count(&self) -> usize {
        self.available().count()
    }

    fn as_array(&self) -> [Option<f64>; SubscoreKind::COUNT] {
        [
            self.innovation,
            self.product_momentum,
            self.financial_quality,
            self.brand_clout,
            self.market_momentum,
            self.talent_demand,
            self.ethics_risk,
        ]
    }
}
