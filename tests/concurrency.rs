// tests/concurrency.rs
//
// The engine owns no mutable state: many callers can score at once and each
// gets exactly the report a sequential call would produce.

use std::sync::Arc;

use company_scorecard::{
    FinancialSignals, JobSignals, NewsSignals, RawSignalBundle, ScoringEngine,
};

fn bundle(i: u64) -> RawSignalBundle {
    RawSignalBundle::default()
        .with_financials(FinancialSignals {
            change_percent: Some((i % 11) as f64 - 5.0),
            pe: Some(5.0 + i as f64),
            ..Default::default()
        })
        .with_news(NewsSignals {
            headline_count_30d: Some(i * 3),
        })
        .with_jobs(JobSignals {
            job_count: Some(i * 7),
        })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_match_sequential_results() {
    let engine = Arc::new(ScoringEngine::default());
    let expected: Vec<_> = (0..64).map(|i| engine.compute(&bundle(i))).collect();

    let mut handles = Vec::new();
    for i in 0..64u64 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::task::spawn_blocking(move || {
            (i, engine.compute(&bundle(i)))
        }));
    }

    for h in handles {
        let (i, report) = h.await.expect("scoring task panicked");
        assert_eq!(report, expected[i as usize], "bundle {i} diverged");
    }
}

#[test]
fn scoped_threads_share_one_engine() {
    let engine = ScoringEngine::default();
    let b = bundle(9);
    let baseline = engine.compute(&b);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| engine.compute(&b)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), baseline);
        }
    });
}
