use metrix_core::{Registry, Snapshot};

/// Source of metric snapshots served by the endpoint.
///
/// Implemented for [`Registry`]; custom sources can merge several registries
/// or filter families before exposition.
pub trait MetricsSource: Send + Sync + 'static {
    /// Take a point-in-time copy of the metrics to expose.
    fn snapshot(&self) -> Snapshot;
}

impl MetricsSource for Registry {
    fn snapshot(&self) -> Snapshot {
        Registry::snapshot(self)
    }
}
