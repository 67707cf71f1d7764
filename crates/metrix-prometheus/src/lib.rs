//! Text exposition encoder for metrix.
//!
//! This crate turns a [`metrix_core::Snapshot`] into the plain-text exchange
//! format understood by Prometheus-compatible scrapers (`version=0.0.4`).
//!
//! ## Example
//! ```rust
//! use metrix_core::{MetricKind, Registry};
//! use metrix_prometheus::TextEncoder;
//!
//! let registry = Registry::new();
//! let requests = registry
//!     .register("http_requests", "Total HTTP requests served", MetricKind::Counter, ["method", "status_code"])
//!     .unwrap();
//! requests.increment(&["get", "200"], 5.0).unwrap();
//!
//! let body = TextEncoder::new().encode(&registry.snapshot());
//! assert!(body.contains("http_requests{method=\"get\",status_code=\"200\"} 5\n"));
//! ```
//!
//! ## Output layout
//! For every family, in registration order:
//! - `# HELP <name> <help>`
//! - `# TYPE <name> <counter|gauge>`
//! - one sample line per series, sorted by the rendered label string.
//!
//! The encoder is pure: the same snapshot always yields byte-identical text.

mod encoder;
pub use encoder::{CONTENT_TYPE, TextEncoder, encode};

mod escape;
