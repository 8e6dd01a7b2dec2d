//! Scorecard envelope: a `ScoreReport` plus company identity, a timestamp and
//! which signal families responded.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::company::{resolve_company, CompanyProfile};
use crate::engine::ScoringEngine;
use crate::report::ScoreMeta;
use crate::signals::RawSignalBundle;
use crate::subscore::Subscores;

/// Presence flag per signal family. Lets a consumer tell "scored low" from
/// "never had the data" without looking at the raw bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePresence {
    pub financials_present: bool,
    pub news_present: bool,
    pub jobs_present: bool,
    pub code_activity_present: bool,
}

impl From<&RawSignalBundle> for SourcePresence {
    fn from(b: &RawSignalBundle) -> Self {
        Self {
            financials_present: b.financials.is_some(),
            news_present: b.news.is_some(),
            jobs_present: b.jobs.is_some(),
            code_activity_present: b.code_activity.is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scorecard {
    /// Lower-cased, trimmed company name as requested.
    pub company: String,
    /// Resolved ticker, or the upper-cased request when nothing resolved.
    pub ticker: String,
    /// RFC 3339 UTC generation time.
    pub timestamp: String,
    pub scores: Subscores,
    pub composite: Option<f64>,
    pub meta: ScoreMeta,
    /// `"<Company>: "` followed by the report explanation.
    pub explanation: String,
    pub sources: SourcePresence,
}

/// Equality ignores `timestamp`.
impl PartialEq for Scorecard {
    fn eq(&self, other: &Self) -> bool {
        self.company == other.company
            && self.ticker == other.ticker
            && self.scores == other.scores
            && self.composite == other.composite
            && self.meta == other.meta
            && self.explanation == other.explanation
            && self.sources == other.sources
    }
}

/// Score an already-fetched bundle for `company` with the given engine.
pub fn build_scorecard_with(
    engine: &ScoringEngine,
    company: &str,
    bundle: &RawSignalBundle,
) -> Scorecard {
    build_at(engine, company, bundle, Utc::now())
}

/// Same as `build_scorecard_with`, default engine.
pub fn build_scorecard(company: &str, bundle: &RawSignalBundle) -> Scorecard {
    build_scorecard_with(&ScoringEngine::default(), company, bundle)
}

fn build_at(
    engine: &ScoringEngine,
    company: &str,
    bundle: &RawSignalBundle,
    now: DateTime<Utc>,
) -> Scorecard {
    let profile: CompanyProfile = resolve_company(company);
    let report = engine.compute(bundle);
    let name = company.trim();

    Scorecard {
        company: name.to_lowercase(),
        ticker: profile.ticker.unwrap_or_else(|| name.to_uppercase()),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        scores: report.scores,
        composite: report.composite,
        meta: report.meta,
        explanation: format!("{}: {}", title_case(name), report.explanation),
        sources: SourcePresence::from(bundle),
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the rest:
/// "acme rocket works" → "Acme Rocket Works", "puma-se" → "Puma-Se".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_letter = false;
    for c in s.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{FinancialSignals, NewsSignals};
    use chrono::TimeZone;

    fn bundle() -> RawSignalBundle {
        RawSignalBundle::default()
            .with_financials(FinancialSignals {
                pe: Some(15.0),
                ..Default::default()
            })
            .with_news(NewsSignals {
                headline_count_30d: Some(60),
            })
    }

    #[test]
    fn envelope_fields() {
        let now = Utc.with_ymd_and_hms(2025, 8, 16, 10, 0, 0).unwrap();
        let sc = build_at(&ScoringEngine::default(), "  NVIDIA ", &bundle(), now);
        assert_eq!(sc.company, "nvidia");
        assert_eq!(sc.ticker, "NVDA");
        assert_eq!(sc.timestamp, "2025-08-16T10:00:00Z");
        assert!(sc.explanation.starts_with("Nvidia: Composite "));
        assert!(sc.sources.financials_present);
        assert!(sc.sources.news_present);
        assert!(!sc.sources.jobs_present);
        assert!(!sc.sources.code_activity_present);
    }

    #[test]
    fn unknown_company_uses_upper_cased_name() {
        let sc = build_scorecard("acme rocket works", &RawSignalBundle::default());
        assert_eq!(sc.ticker, "ACME ROCKET WORKS");
        assert_eq!(sc.composite, None);
        assert!(sc
            .explanation
            .starts_with("Acme Rocket Works: Composite unavailable"));
    }

    #[test]
    fn equality_ignores_timestamp() {
        let e = ScoringEngine::default();
        let a = build_at(&e, "apple", &bundle(), Utc.timestamp_opt(0, 0).unwrap());
        let b = build_at(&e, "apple", &bundle(), Utc.timestamp_opt(86_400, 0).unwrap());
        assert_ne!(a.timestamp, b.timestamp);
        assert_eq!(a, b);
    }

    #[test]
    fn envelope_carries_engine_report() {
        let e = ScoringEngine::default();
        let sc = build_scorecard_with(&e, "apple", &bundle());
        let r = e.compute(&bundle());
        assert_eq!(sc.scores, r.scores);
        assert_eq!(sc.composite, r.composite);
        assert_eq!(sc.meta, r.meta);
        assert_eq!(sc.explanation, format!("Apple: {}", r.explanation));
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("puma se"), "Puma Se");
        assert_eq!(title_case("META platforms"), "Meta Platforms");
    }

    #[test]
    fn title_case_restarts_after_punctuation_and_digits() {
        assert_eq!(title_case("puma-se"), "Puma-Se");
        assert_eq!(title_case("o'reilly media"), "O'Reilly Media");
        assert_eq!(title_case("3m co"), "3M Co");

        let sc = build_scorecard("puma-se", &bundle());
        assert!(sc.explanation.starts_with("Puma-Se: Composite "));
    }
}
