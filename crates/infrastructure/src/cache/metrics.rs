use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters for cache activity, updated with relaxed stores.
#[derive(Default)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub insertions: AtomicU64,
    pub evictions: AtomicU64,
    pub monitors_started: AtomicU64,
    pub monitors_stopped: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub monitors_started: u64,
    pub monitors_stopped: u64,
    pub live_monitors: u64,
}

impl CacheMetrics {
    pub fn snapshot(&self) -> CacheMetricsSnapshot {
        let started = self.monitors_started.load(Ordering::Relaxed);
        let stopped = self.monitors_stopped.load(Ordering::Relaxed);
        CacheMetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            monitors_started: started,
            monitors_stopped: stopped,
            live_monitors: started.saturating_sub(stopped),
        }
    }
}
