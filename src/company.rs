//! # Company Resolution
//!
//! Maps a free-form company name (e.g. "Nvidia", "Meta Platforms", "aapl")
//! onto the identifiers the upstream fetchers need: market ticker, code-hosting
//! organization and careers page.
//!
//! - Case-insensitive lookup with normalization of punctuation, dashes, etc.
//! - Aliases map alternative spellings and tickers to a canonical company.
//! - Fallback: ticker-looking input (1–6 letters, dots allowed) is used as the
//!   ticker, upper-cased; anything else resolves to no ticker at all.
//!
//! Pure lookup; nothing here touches the network.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifiers for one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub careers_url: Option<String>,
    /// Whether the profile came from the seed table rather than the fallback.
    pub known: bool,
}

struct Seed {
    ticker: &'static str,
    github_org: Option<&'static str>,
    careers_url: Option<&'static str>,
}

static COMPANIES: Lazy<HashMap<&'static str, Seed>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for (name, ticker, org, careers) in [
        ("nvidia", "NVDA", Some("NVIDIA"), Some("https://www.nvidia.com/en-us/about-nvidia/careers/")),
        ("apple", "AAPL", Some("apple"), Some("https://jobs.apple.com/en-us/search")),
        ("microsoft", "MSFT", Some("microsoft"), Some("https://jobs.careers.microsoft.com/global/en")),
        ("meta", "META", Some("facebook"), Some("https://www.metacareers.com/jobs")),
        ("google", "GOOGL", Some("google"), Some("https://careers.google.com/jobs/results/")),
        ("amazon", "AMZN", Some("aws"), None),
        ("netflix", "NFLX", Some("Netflix"), None),
        ("tesla", "TSLA", Some("teslamotors"), None),
        ("puma", "PUM.DE", None, None),
    ] {
        m.insert(
            name,
            Seed {
                ticker,
                github_org: org,
                careers_url: careers,
            },
        );
    }
    m
});

static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("nvda", "nvidia"),
        ("nvidia corporation", "nvidia"),
        ("aapl", "apple"),
        ("apple inc", "apple"),
        ("msft", "microsoft"),
        ("facebook", "meta"),
        ("meta platforms", "meta"),
        ("alphabet", "google"),
        ("alphabet inc", "google"),
        ("googl", "google"),
        ("amzn", "amazon"),
        ("nflx", "netflix"),
        ("tsla", "tesla"),
        ("pum", "puma"),
        ("puma se", "puma"),
    ])
});

/// Resolve a company name. Never fails; unknown names get a fallback profile.
pub fn resolve_company(name: &str) -> CompanyProfile {
    let key = normalize(name);
    let canon = ALIASES.get(key.as_str()).copied().unwrap_or(key.as_str());

    if let Some(seed) = COMPANIES.get(canon) {
        return CompanyProfile {
            ticker: Some(seed.ticker.to_string()),
            github_org: seed.github_org.map(str::to_string),
            careers_url: seed.careers_url.map(str::to_string),
            known: true,
        };
    }

    let trimmed = name.trim();
    CompanyProfile {
        ticker: looks_like_ticker(trimmed).then(|| trimmed.to_ascii_uppercase()),
        github_org: None,
        careers_url: None,
        known: false,
    }
}

/// 1–6 ASCII letters, dots allowed (`BRK.B`, `PUM.DE`).
pub fn looks_like_ticker(s: &str) -> bool {
    (1..=6).contains(&s.len())
        && s.chars().any(|c| c.is_ascii_alphabetic())
        && s.chars().all(|c| c.is_ascii_alphabetic() || c == '.')
}

/// Lowercase, punctuation/dashes to spaces, collapsed whitespace.
fn normalize(s: &str) -> String {
    let mut out = s.trim().to_lowercase();
    for ch in ['—', '–', '-', '_', '/', '\\', ',', '.', '\'', '’'] {
        out = out.replace(ch, " ");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
