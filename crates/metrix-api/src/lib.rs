//! HTTP exposition endpoint for metrix.
//!
//! Serves a single route, `GET /metrics`, which snapshots a [`MetricsSource`]
//! and returns the encoded text. Every other method or path answers `404`.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use metrix_api::{HttpApi, MetricsServer};
//! use metrix_core::Registry;
//!
//! # async fn run() -> Result<(), metrix_api::ApiError> {
//! let registry = Arc::new(Registry::new());
//! let router = HttpApi::new(registry).router();
//!
//! let server = MetricsServer::bind("0.0.0.0:8001".parse().unwrap()).await?;
//! server.serve(router, std::future::pending()).await
//! # }
//! ```
mod error;
pub use error::ApiError;

mod handler;
pub use handler::MetricsSource;

mod http;
pub use http::{HttpApi, METRICS_PATH};

mod server;
pub use server::MetricsServer;
