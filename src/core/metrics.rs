//! Adapter metrics for observability
//!
//! Counts where records were routed and how often emission failed, which
//! makes the fallback-to-backend switchover observable.

use std::sync::atomic::{AtomicU64, Ordering};

/// Routing and failure counters for one [`LoggerAdapter`](super::LoggerAdapter)
///
/// # Example
///
/// ```
/// use rust_logger_adapter::core::AdapterMetrics;
///
/// let metrics = AdapterMetrics::new();
/// metrics.record_fallback();
/// metrics.record_backend();
///
/// assert_eq!(metrics.total_emitted(), 2);
/// ```
#[derive(Debug)]
pub struct AdapterMetrics {
    /// Records delivered through the fallback console
    fallback_emitted: AtomicU64,

    /// Records delivered through the native logger
    backend_emitted: AtomicU64,

    /// Records dropped by the adapter's level policy
    filtered: AtomicU64,

    /// Emission calls that returned an error or panicked
    emission_failures: AtomicU64,

    /// Fallback-to-backend swaps (0 or 1)
    backend_swaps: AtomicU64,
}

impl AdapterMetrics {
    pub const fn new() -> Self {
        Self {
            fallback_emitted: AtomicU64::new(0),
            backend_emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            emission_failures: AtomicU64::new(0),
            backend_swaps: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn fallback_emitted(&self) -> u64 {
        self.fallback_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn backend_emitted(&self) -> u64 {
        self.backend_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn emission_failures(&self) -> u64 {
        self.emission_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn backend_swaps(&self) -> u64 {
        self.backend_swaps.load(Ordering::Relaxed)
    }

    /// Records that reached any logger successfully
    pub fn total_emitted(&self) -> u64 {
        self.fallback_emitted() + self.backend_emitted()
    }

    #[inline]
    pub fn record_fallback(&self) -> u64 {
        self.fallback_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_backend(&self) -> u64 {
        self.backend_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed emission, returning the previous failure count
    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.emission_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_swap(&self) -> u64 {
        self.backend_swaps.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been emitted.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.emission_failures() as f64;
        let total = self.total_emitted() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for AdapterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AdapterMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            fallback_emitted: AtomicU64::new(self.fallback_emitted()),
            backend_emitted: AtomicU64::new(self.backend_emitted()),
            filtered: AtomicU64::new(self.filtered()),
            emission_failures: AtomicU64::new(self.emission_failures()),
            backend_swaps: AtomicU64::new(self.backend_swaps()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = AdapterMetrics::new();
        assert_eq!(metrics.fallback_emitted(), 0);
        assert_eq!(metrics.backend_emitted(), 0);
        assert_eq!(metrics.filtered(), 0);
        assert_eq!(metrics.emission_failures(), 0);
        assert_eq!(metrics.backend_swaps(), 0);
    }

    #[test]
    fn test_record_failure_returns_previous() {
        let metrics = AdapterMetrics::new();
        assert_eq!(metrics.record_failure(), 0);
        assert_eq!(metrics.record_failure(), 1);
        assert_eq!(metrics.emission_failures(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = AdapterMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_backend();
        }
        for _ in 0..10 {
            metrics.record_failure();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = AdapterMetrics::new();
        metrics.record_fallback();

        let snapshot = metrics.clone();
        metrics.record_fallback();

        assert_eq!(metrics.fallback_emitted(), 2);
        assert_eq!(snapshot.fallback_emitted(), 1);
    }
}
