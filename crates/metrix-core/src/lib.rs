//! Metrics registry core.
//!
//! A [`Registry`] owns labeled metric families ([`MetricVec`]). Values are
//! mutated through the vector handles returned at registration time and read
//! back as a point-in-time [`Snapshot`].
//!
//! ```rust
//! use metrix_core::{MetricKind, Registry};
//!
//! let registry = Registry::new();
//! let requests = registry
//!     .register("http_requests", "Total HTTP requests served", MetricKind::Counter, ["method", "status_code"])
//!     .unwrap();
//!
//! requests.inc(&["get", "200"]).unwrap();
//! assert_eq!(requests.get(&["get", "200"]).unwrap(), 1.0);
//! ```
pub mod error;
pub mod registry;
pub mod vec;

pub use error::{CoreError, CoreResult};
pub use registry::{FamilySnapshot, Registry, SeriesSnapshot, Snapshot};
pub use vec::MetricVec;

pub use metrix_model::{LabelPair, LabelSet, MetricDesc, MetricKind};

pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::registry::{Registry, Snapshot};
    pub use crate::vec::MetricVec;
    pub use metrix_model::{LabelSet, MetricKind};
}
