//! Process-wide collection of metric families.
//!
//! The registry is created at startup, filled during a registration phase and
//! then shared (behind an `Arc`) with whoever needs to read it. Names and
//! label declarations never change after registration; only series values do.
mod snapshot;
pub use snapshot::{FamilySnapshot, SeriesSnapshot, Snapshot};

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use metrix_model::{MetricDesc, MetricKind};
use tracing::{debug, instrument};

use crate::{
    error::{CoreError, CoreResult},
    vec::MetricVec,
};

/// Registry of metric families keyed by unique name.
#[derive(Default)]
pub struct Registry {
    families: RwLock<Families>,
}

#[derive(Default)]
struct Families {
    /// Registration order.
    order: Vec<MetricVec>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new family and return its handle.
    ///
    /// # Errors
    /// - [`CoreError::DuplicateMetricName`] if `name` is already registered.
    /// - [`CoreError::InvalidMetricName`] / [`CoreError::InvalidLabelName`] if a name breaks the naming rules.
    pub fn register<N, H, I, L>(
        &self,
        name: N,
        help: H,
        kind: MetricKind,
        label_names: I,
    ) -> CoreResult<MetricVec>
    where
        N: Into<String>,
        H: Into<String>,
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let desc = MetricDesc::new(name, help, kind, label_names)?;
        self.register_desc(desc)
    }

    /// Register a family from a prepared descriptor (e.g. one with constant labels).
    #[instrument(level = "debug", skip(self, desc), fields(metric = %desc.name(), kind = %desc.kind()))]
    pub fn register_desc(&self, desc: MetricDesc) -> CoreResult<MetricVec> {
        let mut families = self.families.write().unwrap_or_else(PoisonError::into_inner);

        if families.by_name.contains_key(desc.name()) {
            return Err(CoreError::DuplicateMetricName(desc.name().to_string()));
        }

        let name = desc.name().to_string();
        let vec = MetricVec::new(desc);
        let idx = families.order.len();
        families.order.push(vec.clone());
        families.by_name.insert(name, idx);

        debug!(labels = ?vec.desc().label_names(), "metric registered");
        Ok(vec)
    }

    /// Register a counter family.
    pub fn counter_vec<I, L>(&self, name: &str, help: &str, label_names: I) -> CoreResult<MetricVec>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.register(name, help, MetricKind::Counter, label_names)
    }

    /// Register a gauge family.
    pub fn gauge_vec<I, L>(&self, name: &str, help: &str, label_names: I) -> CoreResult<MetricVec>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.register(name, help, MetricKind::Gauge, label_names)
    }

    /// Look up a registered family by name.
    pub fn get(&self, name: &str) -> Option<MetricVec> {
        let families = self.families.read().unwrap_or_else(PoisonError::into_inner);
        families
            .by_name
            .get(name)
            .and_then(|&idx| families.order.get(idx))
            .cloned()
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.families
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take a point-in-time copy of every family, in registration order.
    ///
    /// The registry lock is only held while cloning the family handles; each
    /// vector's lock is then taken and released in turn while its series are
    /// copied out. No lock is held once this returns.
    pub fn snapshot(&self) -> Snapshot {
        let vecs: Vec<MetricVec> = self
            .families
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .clone();

        let families = vecs
            .iter()
            .map(|vec| FamilySnapshot {
                desc: vec.desc_arc(),
                series: vec.collect(),
            })
            .collect();

        Snapshot::new(families)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("families", &self.len())
            .finish()
    }
}
