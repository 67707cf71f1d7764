use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use metrix_core::MetricVec;
use metrix_prometheus::TextEncoder;
use tracing::{debug, warn};

use crate::handler::MetricsSource;

/// Path of the exposition route.
pub const METRICS_PATH: &str = "/metrics";

/// Exposition endpoint builder.
pub struct HttpApi<S> {
    state: ScrapeState<S>,
}

impl<S> HttpApi<S>
where
    S: MetricsSource,
{
    /// Create the endpoint over the given source with default encoder options.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            state: ScrapeState {
                source,
                encoder: TextEncoder::new(),
                scrapes: None,
            },
        }
    }

    /// Use a custom encoder (e.g. one emitting `_created` samples).
    pub fn with_encoder(mut self, encoder: TextEncoder) -> Self {
        self.state.encoder = encoder;
        self
    }

    /// Count requests on the exposition route.
    ///
    /// `counter` must be a counter family with a single `code` label; it is
    /// incremented with the response status code of every request on
    /// [`METRICS_PATH`].
    pub fn with_scrape_counter(mut self, counter: MetricVec) -> Self {
        self.state.scrapes = Some(counter);
        self
    }

    /// Build the axum router.
    ///
    /// Routes:
    /// - GET /metrics - Encoded snapshot
    /// - any other method or path - 404
    pub fn router(self) -> Router {
        Router::new()
            .route(
                METRICS_PATH,
                get(scrape::<S>)
                    .head(method_not_served::<S>)
                    .fallback(method_not_served::<S>),
            )
            .fallback(not_found)
            .with_state(self.state)
    }
}

struct ScrapeState<S> {
    source: Arc<S>,
    encoder: TextEncoder,
    scrapes: Option<MetricVec>,
}

impl<S> Clone for ScrapeState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            encoder: self.encoder,
            scrapes: self.scrapes.clone(),
        }
    }
}

impl<S> ScrapeState<S> {
    fn record(&self, status: StatusCode) {
        let Some(counter) = &self.scrapes else {
            return;
        };
        if let Err(e) = counter.inc(&[status.as_str()]) {
            warn!(error = %e, "scrape counter rejected update");
        }
    }
}

/// GET /metrics
async fn scrape<S>(State(state): State<ScrapeState<S>>) -> Response
where
    S: MetricsSource,
{
    let snapshot = state.source.snapshot();
    let body = state.encoder.encode(&snapshot);
    state.record(StatusCode::OK);

    debug!(families = snapshot.families().len(), bytes = body.len(), "scrape served");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, state.encoder.format_type())],
        body,
    )
        .into_response()
}

/// Any method other than GET on /metrics, HEAD included.
async fn method_not_served<S>(State(state): State<ScrapeState<S>>) -> StatusCode
where
    S: MetricsSource,
{
    state.record(StatusCode::NOT_FOUND);
    StatusCode::NOT_FOUND
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
