//! Store metrics and observability.
//!
//! Counters for translation loading: cache traffic, fetch failures, silent
//! default substitutions, and missing-key lookups. Each store owns its own
//! counter set, so independent stores (and tests) never share state. The
//! substitution counter exists so the lenient unsupported-code policy stays
//! observable instead of regressing silently.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters owned by one translation store.
#[derive(Debug, Default)]
pub struct StoreMetrics {
    /// Number of loads answered from the document cache
    cache_hits: AtomicUsize,

    /// Number of loads that had to go to the source
    cache_misses: AtomicUsize,

    /// Number of source fetches that failed or returned malformed content
    fetch_failures: AtomicUsize,

    /// Number of unsupported codes silently substituted with the default
    substitutions: AtomicUsize,

    /// Number of lookups that fell through to fallback text
    missing_keys: AtomicUsize,
}

impl StoreMetrics {
    /// Fresh counter set with everything at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a load answered from cache.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a load that went to the source.
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed source fetch.
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an unsupported code substituted with the default locale.
    pub fn record_substitution(&self) {
        self.substitutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dotted-key lookup that did not resolve.
    pub fn record_missing_key(&self) {
        self.missing_keys.fetch_add(1, Ordering::Relaxed);
    }

    /// Current cache hit count.
    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Current cache miss count.
    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Current fetch failure count.
    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    /// Current substitution count.
    pub fn substitutions(&self) -> usize {
        self.substitutions.load(Ordering::Relaxed)
    }

    /// Current missing-key count.
    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    /// Generate a point-in-time snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_loads = hits + misses;
        let cache_hit_rate = if total_loads > 0 {
            (hits as f64 / total_loads as f64) * 100.0
        } else {
            0.0
        };

        MetricsSnapshot {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            fetch_failures: self.fetch_failures(),
            substitutions: self.substitutions(),
            missing_keys: self.missing_keys(),
        }
    }
}

/// Point-in-time metrics, serialized into the health endpoint response.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Number of cache hits
    pub cache_hits: usize,

    /// Number of cache misses
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    /// Number of failed source fetches
    pub fetch_failures: usize,

    /// Number of unsupported codes substituted with the default
    pub substitutions: usize,

    /// Number of lookups resolved via fallback text
    pub missing_keys: usize,
}
