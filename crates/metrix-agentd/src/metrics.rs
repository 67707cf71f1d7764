//! Families registered by the agent at startup.

use std::time::{SystemTime, UNIX_EPOCH};

use metrix_core::{CoreResult, MetricDesc, MetricKind, MetricVec, Registry};

/// HTTP requests served, by method and status code.
pub const HTTP_REQUESTS: &str = "http_requests";
/// Requests on the exposition route, by status code.
pub const SCRAPE_REQUESTS: &str = "metrix_scrape_requests_total";
pub const START_TIME: &str = "process_start_time_seconds";
pub const BUILD_INFO: &str = "metrix_build_info";

/// Handles to the agent's own families.
#[derive(Debug, Clone)]
pub struct AgentMetrics {
    pub http_requests: MetricVec,
    pub scrapes: MetricVec,
}

impl AgentMetrics {
    /// Register every agent family.
    ///
    /// Any error is a startup error; nothing is served until this succeeds.
    pub fn register(registry: &Registry) -> CoreResult<Self> {
        let http_requests = registry.counter_vec(
            HTTP_REQUESTS,
            "Total HTTP requests served",
            ["method", "status_code"],
        )?;
        let scrapes = registry.counter_vec(
            SCRAPE_REQUESTS,
            "Total requests on the metrics endpoint by status code",
            ["code"],
        )?;

        let start = registry.gauge_vec(
            START_TIME,
            "Start time of the process since unix epoch in seconds",
            Vec::<String>::new(),
        )?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        start.set(&[], now)?;

        let build = MetricDesc::new(
            BUILD_INFO,
            "Build information of the running agent",
            MetricKind::Gauge,
            Vec::<String>::new(),
        )?
        .with_const_label("version", env!("CARGO_PKG_VERSION"))?;
        registry.register_desc(build)?.set(&[], 1.0)?;

        Ok(Self {
            http_requests,
            scrapes,
        })
    }
}
