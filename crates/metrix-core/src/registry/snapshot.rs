use std::{sync::Arc, time::SystemTime};

use metrix_model::{LabelSet, MetricDesc};

/// Point-in-time copy of a registry.
///
/// Owns all of its data; holding a snapshot never blocks metric updates.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    families: Vec<FamilySnapshot>,
}

/// One family inside a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct FamilySnapshot {
    pub desc: Arc<MetricDesc>,
    /// Series in unspecified order.
    pub series: Vec<SeriesSnapshot>,
}

/// One series inside a [`FamilySnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot {
    /// Declared labels with their values; constant labels live on the descriptor.
    pub labels: LabelSet,
    pub value: f64,
    pub created: SystemTime,
}

impl Snapshot {
    /// Build a snapshot from families, kept in the given order.
    pub fn new(families: Vec<FamilySnapshot>) -> Self {
        Self { families }
    }

    /// Families in registration order.
    pub fn families(&self) -> &[FamilySnapshot] {
        &self.families
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Find a family by metric name.
    pub fn family(&self, name: &str) -> Option<&FamilySnapshot> {
        self.families.iter().find(|f| f.desc.name() == name)
    }
}

impl FamilySnapshot {
    /// Find the series whose labels equal `labels` (pair order ignored).
    pub fn find_series(&self, labels: &LabelSet) -> Option<&SeriesSnapshot> {
        self.series.iter().find(|s| &s.labels == labels)
    }
}
