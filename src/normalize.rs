//! # Signal Normalizer
//! Maps each raw metric family onto an independent 0–100 subscore.
//!
//! Every function here returns `None` ("unavailable") when the inputs it needs
//! are absent, and never fails on malformed numbers: a non-finite or
//! out-of-domain value is dropped for that sub-component only.

use tracing::debug;

use crate::signals::{CodeActivitySignals, FinancialSignals, JobSignals, NewsSignals, RawSignalBundle};
use crate::subscore::Subscores;

// Volume caps: the count at which a scaled subscore saturates at 100.
pub const HEADLINE_CAP_BRAND: f64 = 150.0;
pub const JOB_CAP_BRAND: f64 = 500.0;
pub const JOB_CAP_TALENT: f64 = 400.0;
pub const COMMIT_CAP: f64 = 500.0;
pub const STAR_CAP: f64 = 300.0;
pub const HEADLINE_CAP_PRODUCT: f64 = 120.0;

/// Innovation blend when both commits and stars are present.
pub const COMMIT_SHARE: f64 = 0.6;
pub const STAR_SHARE: f64 = 0.4;

/// Daily move (in percent) that maps to 0 or 100 in market momentum.
pub const MOMENTUM_BAND_PCT: f64 = 5.0;

/// Placeholder ethics/risk value until a negative-news signal exists.
pub const ETHICS_NEUTRAL: f64 = 60.0;

/// Run every normalizer over one bundle.
///
/// An entirely empty bundle yields no subscores at all, the ethics stub
/// included: with no source responding there is nothing to score.
pub fn normalize(bundle: &RawSignalBundle) -> Subscores {
    if bundle.is_empty() {
        return Subscores::default();
    }

    let fin = bundle.financials.as_ref();
    let news = bundle.news.as_ref();
    let jobs = bundle.jobs.as_ref();
    let code = bundle.code_activity.as_ref();

    Subscores {
        innovation: innovation(code),
        product_momentum: product_momentum(news),
        financial_quality: financial_quality(fin),
        brand_clout: brand_clout(news, jobs),
        market_momentum: market_momentum(fin),
        talent_demand: talent_demand(jobs),
        ethics_risk: Some(ethics_risk()),
    }
}

/// Clamp to [0, 100]. NaN collapses to 0.
pub fn clamp100(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 100.0)
    }
}

/// Linear 0..cap → 0..100, clamped.
pub fn scale_capped(value: f64, cap: f64) -> Option<f64> {
    if !value.is_finite() || cap <= 0.0 {
        return None;
    }
    Some(clamp100(value.min(cap) / cap * 100.0))
}

/// Percent-like input that may arrive as a fraction: `|x| <= 1` is read as a
/// fraction and scaled by 100. A real 0.5% growth therefore scores as 50.
pub fn percentish(x: f64) -> f64 {
    if x.abs() <= 1.0 {
        x * 100.0
    } else {
        x
    }
}

/// Shaped P/E curve. Sweet spot 10–30; very low and stretched multiples score
/// lower. Non-positive or non-finite P/E has no score.
pub fn pe_curve(pe: f64) -> Option<f64> {
    if !pe.is_finite() || pe <= 0.0 {
        return None;
    }
    let val = if pe <= 5.0 {
        55.0
    } else if pe <= 10.0 {
        70.0
    } else if pe <= 30.0 {
        // 80 at 10 down to 60 at 30
        80.0 - (pe - 10.0)
    } else if pe <= 60.0 {
        // 60 at 30 down to 35 at 60
        60.0 - (pe - 30.0) * (25.0 / 30.0)
    } else {
        25.0
    };
    Some(clamp100(val))
}

pub fn financial_quality(fin: Option<&FinancialSignals>) -> Option<f64> {
    let fin = fin?;
    let mut parts = Vec::with_capacity(3);

    if let Some(g) = finite(fin.rev_growth_yoy, "rev_growth_yoy") {
        parts.push(clamp100(percentish(g)));
    }
    if let Some(m) = finite(fin.gross_margin_pct, "gross_margin_pct") {
        parts.push(clamp100(percentish(m)));
    }
    if let Some(pe) = finite(fin.pe, "pe").and_then(pe_curve) {
        parts.push(pe);
    }

    mean(&parts)
}

/// Headline volume and hiring volume as a rough visibility proxy.
pub fn brand_clout(news: Option<&NewsSignals>, jobs: Option<&JobSignals>) -> Option<f64> {
    let parts: Vec<f64> = [
        news.and_then(|n| n.headline_count_30d)
            .and_then(|h| scale_capped(h as f64, HEADLINE_CAP_BRAND)),
        jobs.and_then(|j| j.job_count)
            .and_then(|j| scale_capped(j as f64, JOB_CAP_BRAND)),
    ]
    .into_iter()
    .flatten()
    .collect();

    mean(&parts)
}

/// −5% → 0, 0% → 50, +5% → 100.
pub fn market_momentum(fin: Option<&FinancialSignals>) -> Option<f64> {
    let change = finite(fin?.change_percent, "change_percent")?;
    Some(clamp100(
        (change + MOMENTUM_BAND_PCT) / (2.0 * MOMENTUM_BAND_PCT) * 100.0,
    ))
}

pub fn talent_demand(jobs: Option<&JobSignals>) -> Option<f64> {
    scale_capped(jobs?.job_count? as f64, JOB_CAP_TALENT)
}

/// Commits weigh heavier than stars when both are known.
pub fn innovation(code: Option<&CodeActivitySignals>) -> Option<f64> {
    let code = code?;
    let commits = code
        .commits_last_30d
        .and_then(|c| scale_capped(c as f64, COMMIT_CAP));
    let stars = code
        .stars_last_30d
        .and_then(|s| scale_capped(s as f64, STAR_CAP));

    match (commits, stars) {
        (Some(c), Some(s)) => Some(clamp100(c * COMMIT_SHARE + s * STAR_SHARE)),
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}

pub fn product_momentum(news: Option<&NewsSignals>) -> Option<f64> {
    scale_capped(news?.headline_count_30d? as f64, HEADLINE_CAP_PRODUCT)
}

/// Stub: a fixed neutral value. A negative-news or controversy ratio can
/// replace this without touching the aggregator.
pub fn ethics_risk() -> f64 {
    ETHICS_NEUTRAL
}

fn finite(v: Option<f64>, field: &'static str) -> Option<f64> {
    match v {
        Some(x) if x.is_finite() => Some(x),
        Some(x) => {
            debug!(target: "scorecard", field, value = %x, "discarding non-finite input");
            None
        }
        None => None,
    }
}

fn mean(parts: &[f64]) -> Option<f64> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.iter().sum::<f64>() / parts.len() as f64)
    }
}
