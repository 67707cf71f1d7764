use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::SystemTime,
};

/// Value cell of a single series.
///
/// The `f64` value is stored as raw bits in an [`AtomicU64`], so concurrent
/// updates to one series never take a lock and never lose an increment.
#[derive(Debug)]
pub(crate) struct Series {
    bits: AtomicU64,
    created: SystemTime,
}

impl Series {
    /// Create a zero-valued series stamped with the current time.
    pub(crate) fn new() -> Self {
        Self {
            bits: AtomicU64::new(0f64.to_bits()),
            created: SystemTime::now(),
        }
    }

    #[inline]
    pub(crate) fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Add `delta` with a compare-and-swap loop.
    pub(crate) fn add(&self, delta: f64) {
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + delta).to_bits())
            });
    }

    #[inline]
    pub(crate) fn created(&self) -> SystemTime {
        self.created
    }
}
