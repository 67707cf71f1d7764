use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a metric family.
/// - `Counter`: monotonic, only ever increases.
/// - `Gauge`  : arbitrary value, may go up and down or be set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Monotonic non-negative counter.
    Counter,
    /// Freely settable value.
    Gauge,
}

impl MetricKind {
    /// Return the `# TYPE` token used in the text exchange format.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }

    /// Returns `true` for monotonic kinds.
    #[inline]
    pub fn is_monotonic(&self) -> bool {
        matches!(self, MetricKind::Counter)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
