//! # Raw Signals
//! Typed input bundle handed to the scoring pipeline by whatever fetched the data.
//!
//! Two levels of absence are kept apart:
//! - a family (`financials`, `news`, ...) is `None` when no source responded;
//! - a field inside a family is `None` when the source responded without it.
//!
//! Neither is ever the same as a numeric zero.
//!
//! Decoding is lenient: numeric fields accept JSON numbers or numeric strings,
//! anything else (wrong type, negative counts) decodes to `None`. A family that
//! is not a JSON object is treated as absent. Only text that is not JSON at all,
//! or a top level that is not an object, fails `from_json`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// One scoring request's worth of raw metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSignalBundle {
    #[serde(default, deserialize_with = "lenient_family")]
    pub financials: Option<FinancialSignals>,
    #[serde(default, deserialize_with = "lenient_family")]
    pub news: Option<NewsSignals>,
    #[serde(default, deserialize_with = "lenient_family")]
    pub jobs: Option<JobSignals>,
    #[serde(default, alias = "github", deserialize_with = "lenient_family")]
    pub code_activity: Option<CodeActivitySignals>,
}

impl RawSignalBundle {
    /// True when no family responded at all.
    pub fn is_empty(&self) -> bool {
        self.financials.is_none()
            && self.news.is_none()
            && self.jobs.is_none()
            && self.code_activity.is_none()
    }

    /// Parse a bundle from JSON text.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn with_financials(mut self, f: FinancialSignals) -> Self {
        self.financials = Some(f);
        self
    }

    pub fn with_news(mut self, n: NewsSignals) -> Self {
        self.news = Some(n);
        self
    }

    pub fn with_jobs(mut self, j: JobSignals) -> Self {
        self.jobs = Some(j);
        self
    }

    pub fn with_code_activity(mut self, c: CodeActivitySignals) -> Self {
        self.code_activity = Some(c);
        self
    }
}

/// Fundamentals and quote data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSignals {
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    /// Daily price change in percent (`2.5` means +2.5%).
    #[serde(default, deserialize_with = "lenient_number")]
    pub change_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pe: Option<f64>,
    /// Percent or fraction; see `normalize::percentish`.
    #[serde(default, deserialize_with = "lenient_number")]
    pub rev_growth_yoy: Option<f64>,
    /// Percent or fraction; see `normalize::percentish`.
    #[serde(default, deserialize_with = "lenient_number")]
    pub gross_margin_pct: Option<f64>,
}

/// Headline volume over the last 30 days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsSignals {
    #[serde(default, deserialize_with = "lenient_count")]
    pub headline_count_30d: Option<u64>,
}

/// Open job postings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSignals {
    #[serde(default, deserialize_with = "lenient_count")]
    pub job_count: Option<u64>,
}

/// Code-hosting activity over the last 30 days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeActivitySignals {
    #[serde(default, alias = "commits_last30", deserialize_with = "lenient_count")]
    pub commits_last_30d: Option<u64>,
    #[serde(default, alias = "stars_last30", deserialize_with = "lenient_count")]
    pub stars_last_30d: Option<u64>,
}

/// Family object, or `None` for null or anything that is not an object.
fn lenient_family<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(d)? {
        Some(v @ Value::Object(_)) => Ok(serde_json::from_value(v).ok()),
        Some(other) => {
            debug!(target: "scorecard", value = %other, "discarding non-object signal family");
            Ok(None)
        }
        None => Ok(None),
    }
}

fn lenient_number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(number_from_value))
}

fn lenient_count<'de, D>(d: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(count_from_value))
}

/// Finite number from a JSON number or numeric string.
fn number_from_value(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Non-negative integer count. Fractional counts are truncated.
fn count_from_value(v: &Value) -> Option<u64> {
    if let Some(u) = v.as_u64() {
        return Some(u);
    }
    let n = number_from_value(v)?;
    (n >= 0.0 && n <= u64::MAX as f64).then(|| n.trunc() as u64)
}
