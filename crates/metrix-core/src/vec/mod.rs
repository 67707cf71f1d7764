//! Labeled metric family handle.
//!
//! A [`MetricVec`] maps label-value tuples to series. Each vector owns its
//! own lock over the series map; values live in per-series atomics, so
//! unrelated series and unrelated vectors never contend with each other.
mod series;

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use metrix_model::{LabelSet, MetricDesc, MetricKind};
use tracing::trace;

use crate::{
    error::{CoreError, CoreResult},
    registry::SeriesSnapshot,
};
use series::Series;

type SeriesKey = Vec<String>;

/// Handle to a registered counter or gauge family.
///
/// Cloning is cheap; all clones address the same series.
#[derive(Clone)]
pub struct MetricVec {
    inner: Arc<Inner>,
}

struct Inner {
    desc: Arc<MetricDesc>,
    series: RwLock<HashMap<SeriesKey, Arc<Series>>>,
}

impl MetricVec {
    pub(crate) fn new(desc: MetricDesc) -> Self {
        Self {
            inner: Arc::new(Inner {
                desc: Arc::new(desc),
                series: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Descriptor of this family.
    #[inline]
    pub fn desc(&self) -> &MetricDesc {
        &self.inner.desc
    }

    #[inline]
    pub(crate) fn desc_arc(&self) -> Arc<MetricDesc> {
        Arc::clone(&self.inner.desc)
    }

    /// Add `delta` to the series addressed by `values`.
    ///
    /// Values are positional and follow the declared label order. The series
    /// is created with value `0` on first use.
    ///
    /// # Errors
    /// - [`CoreError::LabelArityMismatch`] if the number of values differs from the declared label names.
    /// - [`CoreError::NegativeDelta`] if this is a counter and `delta` is negative (or NaN).
    pub fn increment(&self, values: &[&str], delta: f64) -> CoreResult<()> {
        self.check_arity(values.len())?;
        self.check_delta(delta)?;

        self.series_or_create(values).add(delta);
        Ok(())
    }

    /// Shorthand for `increment(values, 1.0)`.
    #[inline]
    pub fn inc(&self, values: &[&str]) -> CoreResult<()> {
        self.increment(values, 1.0)
    }

    /// Subtract one from a gauge series.
    ///
    /// # Errors
    /// [`CoreError::WrongKind`] on counters, plus the arity errors of [`MetricVec::increment`].
    pub fn dec(&self, values: &[&str]) -> CoreResult<()> {
        self.require_gauge("dec")?;
        self.increment(values, -1.0)
    }

    /// Set a gauge series to `value`.
    ///
    /// # Errors
    /// - [`CoreError::WrongKind`] on counters.
    /// - [`CoreError::LabelArityMismatch`] on a wrong number of values.
    pub fn set(&self, values: &[&str], value: f64) -> CoreResult<()> {
        self.require_gauge("set")?;
        self.check_arity(values.len())?;

        self.series_or_create(values).set(value);
        Ok(())
    }

    /// Current value of a series, `0` if it was never touched.
    ///
    /// Never creates a series.
    pub fn get(&self, values: &[&str]) -> CoreResult<f64> {
        self.check_arity(values.len())?;

        let key = to_key(values);
        let map = self.inner.series.read().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(&key).map(|s| s.get()).unwrap_or(0.0))
    }

    /// Like [`MetricVec::increment`], addressing the series by label names.
    ///
    /// # Errors
    /// [`CoreError::UnknownLabelName`] if a name is not declared for this family.
    pub fn increment_with(&self, labels: &LabelSet, delta: f64) -> CoreResult<()> {
        let values = self.resolve(labels)?;
        self.increment(&values, delta)
    }

    /// Like [`MetricVec::set`], addressing the series by label names.
    pub fn set_with(&self, labels: &LabelSet, value: f64) -> CoreResult<()> {
        let values = self.resolve(labels)?;
        self.set(&values, value)
    }

    /// Like [`MetricVec::get`], addressing the series by label names.
    pub fn get_with(&self, labels: &LabelSet) -> CoreResult<f64> {
        let values = self.resolve(labels)?;
        self.get(&values)
    }

    /// Number of series created so far.
    pub fn series_count(&self) -> usize {
        self.inner
            .series
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Copy all series out under the read lock.
    ///
    /// The lock is released before this returns; callers work on owned data.
    pub(crate) fn collect(&self) -> Vec<SeriesSnapshot> {
        let cells: Vec<(SeriesKey, Arc<Series>)> = {
            let map = self.inner.series.read().unwrap_or_else(PoisonError::into_inner);
            map.iter().map(|(k, s)| (k.clone(), Arc::clone(s))).collect()
        };

        let names = self.desc().label_names();
        cells
            .into_iter()
            .map(|(values, cell)| SeriesSnapshot {
                labels: names
                    .iter()
                    .zip(values)
                    .map(|(n, v)| (n.clone(), v))
                    .collect(),
                value: cell.get(),
                created: cell.created(),
            })
            .collect()
    }

    fn series_or_create(&self, values: &[&str]) -> Arc<Series> {
        let key = to_key(values);
        {
            let map = self.inner.series.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(s) = map.get(&key) {
                return Arc::clone(s);
            }
        }

        let mut map = self.inner.series.write().unwrap_or_else(PoisonError::into_inner);
        let series = map.entry(key).or_insert_with_key(|key| {
            trace!(metric = self.desc().name(), labels = ?key, "series created");
            Arc::new(Series::new())
        });
        Arc::clone(series)
    }

    fn resolve<'a>(&self, labels: &'a LabelSet) -> CoreResult<Vec<&'a str>> {
        let desc = self.desc();
        self.check_arity(labels.len())?;

        let mut values: Vec<Option<&str>> = vec![None; desc.label_names().len()];
        for pair in labels {
            let pos = desc
                .label_position(pair.name())
                .ok_or_else(|| CoreError::UnknownLabelName {
                    metric: desc.name().to_string(),
                    label: pair.name().to_string(),
                })?;
            values[pos] = Some(pair.value());
        }

        // Same length and every name known; a hole means a name was repeated.
        values
            .into_iter()
            .zip(desc.label_names())
            .map(|(v, name)| {
                v.ok_or_else(|| CoreError::UnknownLabelName {
                    metric: desc.name().to_string(),
                    label: name.clone(),
                })
            })
            .collect()
    }

    fn check_arity(&self, actual: usize) -> CoreResult<()> {
        let expected = self.desc().label_names().len();
        if actual != expected {
            return Err(CoreError::LabelArityMismatch {
                metric: self.desc().name().to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn check_delta(&self, delta: f64) -> CoreResult<()> {
        if self.desc().kind().is_monotonic() && !(delta >= 0.0) {
            return Err(CoreError::NegativeDelta {
                metric: self.desc().name().to_string(),
                delta,
            });
        }
        Ok(())
    }

    fn require_gauge(&self, op: &'static str) -> CoreResult<()> {
        match self.desc().kind() {
            MetricKind::Gauge => Ok(()),
            kind => Err(CoreError::WrongKind {
                metric: self.desc().name().to_string(),
                kind,
                op,
            }),
        }
    }
}

impl std::fmt::Debug for MetricVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricVec")
            .field("name", &self.desc().name())
            .field("kind", &self.desc().kind())
            .field("series", &self.series_count())
            .finish()
    }
}

#[inline]
fn to_key(values: &[&str]) -> SeriesKey {
    values.iter().map(|v| v.to_string()).collect()
}
