//! Scorecard CLI — Binary Entrypoint
//! Reads an already-fetched signal bundle (JSON file or stdin), scores it and
//! prints the scorecard as pretty JSON.
//!
//! Usage: `scorecard <company> [bundle.json]`

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use company_scorecard::{build_scorecard_with, RawSignalBundle, ScoringEngine};

/// Compact logs to stderr by default, JSON lines with `SCORECARD_LOG_JSON=1`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scorecard=info,warn"));

    let json = std::env::var("SCORECARD_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn read_bundle(path: Option<PathBuf>) -> Result<RawSignalBundle> {
    let raw = match path {
        Some(p) => std::fs::read_to_string(&p)
            .with_context(|| format!("reading bundle from {}", p.display()))?,
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("reading bundle from stdin")?;
            s
        }
    };
    if raw.trim().is_empty() {
        return Ok(RawSignalBundle::default());
    }
    RawSignalBundle::from_json(&raw).context("parsing signal bundle JSON")
}

fn main() -> Result<()> {
    // Load .env if present; no-op otherwise.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(company) = args.next() else {
        bail!("usage: scorecard <company> [bundle.json]");
    };
    let bundle_path = args.next().map(PathBuf::from);

    // Config errors are fatal here, never per request.
    let engine = ScoringEngine::from_env()?;
    tracing::info!(
        target: "scorecard",
        weights = ?engine.weights(),
        coverage_penalty = engine.coverage_penalty(),
        "scoring engine ready"
    );
    let bundle = read_bundle(bundle_path)?;

    let card = build_scorecard_with(&engine, &company, &bundle);
    tracing::info!(
        target: "scorecard",
        company = %card.company,
        composite = ?card.composite,
        coverage = card.meta.coverage,
        "scorecard built"
    );

    println!("{}", serde_json::to_string_pretty(&card)?);
    Ok(())
}
