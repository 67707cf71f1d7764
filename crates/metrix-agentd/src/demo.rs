//! Synthetic request workload.
//!
//! Stands in for an instrumented application: every tick records one
//! successful GET, every tenth tick also records a failed one.

use std::time::Duration;

use metrix_core::MetricVec;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Interval between synthetic requests.
pub const DEMO_INTERVAL: Duration = Duration::from_millis(250);

/// Every n-th tick also records a server error.
pub const ERROR_EVERY: u64 = 10;

/// Run until `token` is cancelled.
pub async fn run(requests: MetricVec, interval: Duration, token: CancellationToken) {
    info!(interval_ms = interval.as_millis() as u64, "demo workload started");
    let mut ticker = tokio::time::interval(interval);
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        ticks += 1;
        record(&requests, "200");
        if ticks % ERROR_EVERY == 0 {
            record(&requests, "500");
        }
    }

    debug!(ticks, "demo workload stopped");
}

fn record(requests: &MetricVec, status_code: &str) {
    if let Err(e) = requests.inc(&["get", status_code]) {
        warn!(error = %e, "demo workload failed to record request");
    }
}
