use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, info};
use webless_application::ports::{DomainHealthCache, WebsiteProber};
use webless_domain::clock::unix_now_secs;
use webless_domain::config::CacheConfig;
use webless_domain::DomainHealth;

use crate::cache::entry::CacheEntry;
use crate::cache::metrics::CacheMetrics;
use crate::health::HealthMonitor;

/// Fraction of `max_entries` removed per eviction batch.
const BATCH_EVICTION_FRACTION: f64 = 0.01;

/// Entries sampled per eviction slot. Higher values approximate true LRU
/// more closely at the cost of a longer scan.
const EVICTION_SAMPLE_FACTOR: usize = 8;

/// Concurrent store of per-domain health state.
///
/// Every monitored entry owns the background task probing its website.
/// Removal paths (batch eviction, idle sweep, explicit remove, shutdown)
/// all cancel the monitor while still holding the shard write lock, so a
/// domain can never have two live monitors.
pub struct HealthCache {
    entries: DashMap<Arc<str>, CacheEntry, FxBuildHasher>,
    max_entries: usize,
    idle_timeout_secs: u64,
    prober: Arc<dyn WebsiteProber>,
    metrics: Arc<CacheMetrics>,
}

impl HealthCache {
    pub fn new(config: &CacheConfig, prober: Arc<dyn WebsiteProber>) -> Self {
        info!(
            max_entries = config.max_entries,
            idle_timeout_days = config.idle_timeout_days,
            "Initializing health cache"
        );

        Self {
            entries: DashMap::with_capacity_and_hasher(config.max_entries, FxBuildHasher),
            max_entries: config.max_entries,
            idle_timeout_secs: config.idle_timeout_days * 24 * 60 * 60,
            prober,
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Removes one entry unconditionally, stopping its monitor.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.entries.remove_if(name, |_, entry| {
            entry.on_evict();
            true
        });

        match removed {
            Some((_, entry)) => {
                self.metrics.evictions.fetch_add(1, Ordering::Relaxed);
                if !entry.is_permanent() {
                    self.metrics.monitors_stopped.fetch_add(1, Ordering::Relaxed);
                }
                true
            }
            None => false,
        }
    }

    /// Removes monitored entries that nobody has queried for longer than
    /// the idle timeout. Permanent entries are never swept.
    pub fn sweep_idle(&self) -> usize {
        let now_secs = unix_now_secs();

        let mut idle: Vec<Arc<str>> = Vec::new();
        for entry in self.entries.iter() {
            if entry.value().is_permanent() {
                continue;
            }
            if now_secs.saturating_sub(entry.value().last_access_secs()) >= self.idle_timeout_secs {
                idle.push(entry.key().clone());
            }
        }
        // Iterator released, safe to acquire write locks below.

        let mut removed = 0usize;
        for key in idle {
            // Re-check under the write lock: the entry may have been
            // touched or replaced by a seed since the scan.
            let evicted = self.entries.remove_if(&key, |_, entry| {
                if entry.is_permanent() {
                    return false;
                }
                if now_secs.saturating_sub(entry.last_access_secs()) < self.idle_timeout_secs {
                    return false;
                }
                entry.on_evict();
                true
            });
            if evicted.is_some() {
                removed += 1;
            }
        }

        if removed > 0 {
            self.metrics
                .evictions
                .fetch_add(removed as u64, Ordering::Relaxed);
            self.metrics
                .monitors_stopped
                .fetch_add(removed as u64, Ordering::Relaxed);
            info!(removed, "Swept idle domains from health cache");
        }
        removed
    }

    /// Frees room by evicting the least recently accessed entries found
    /// in a bounded sample of the map.
    fn evict_batch(&self) {
        let count = ((self.max_entries as f64 * BATCH_EVICTION_FRACTION) as usize).max(1);
        let sample_target = count * EVICTION_SAMPLE_FACTOR;

        let mut candidates: Vec<(Arc<str>, u64)> = Vec::with_capacity(sample_target);
        for entry in self.entries.iter() {
            if candidates.len() >= sample_target {
                break;
            }
            if entry.value().is_permanent() {
                continue;
            }
            candidates.push((entry.key().clone(), entry.value().last_access_secs()));
        }
        // Iterator released, safe to acquire write locks below.

        // Oldest access first.
        candidates.sort_unstable_by_key(|(_, last_access)| *last_access);

        let mut evicted = 0usize;
        for (key, _) in candidates.into_iter().take(count) {
            let removed = self.entries.remove_if(&key, |_, entry| {
                if entry.is_permanent() {
                    return false;
                }
                entry.on_evict();
                true
            });
            if removed.is_some() {
                evicted += 1;
            }
        }

        if evicted > 0 {
            self.metrics
                .evictions
                .fetch_add(evicted as u64, Ordering::Relaxed);
            self.metrics
                .monitors_stopped
                .fetch_add(evicted as u64, Ordering::Relaxed);
            debug!(evicted, "Evicted least recently used entries");
        }
    }

    /// Drains the cache and waits for every monitor task to exit.
    pub async fn shutdown(&self) {
        let keys: Vec<Arc<str>> = self.entries.iter().map(|e| e.key().clone()).collect();

        let mut handles = Vec::new();
        for key in keys {
            if let Some((_, entry)) = self.entries.remove(&key) {
                entry.on_evict();
                if let Some(handle) = entry.into_monitor() {
                    handles.push(handle);
                }
            }
        }

        // Every token is already cancelled, so these awaits finish fast.
        let stopped = handles.len();
        for handle in handles {
            handle.stop().await;
        }

        self.metrics
            .monitors_stopped
            .fetch_add(stopped as u64, Ordering::Relaxed);
        info!(drained = stopped, "Health cache shut down");
    }
}

impl DomainHealthCache for HealthCache {
    fn get(&self, name: &str) -> Option<Arc<DomainHealth>> {
        match self.entries.get(name) {
            Some(entry) => {
                entry.touch();
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(&entry.health))
            }
            None => {
                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn get_or_create(&self, name: &str) -> Arc<DomainHealth> {
        if let Some(entry) = self.entries.get(name) {
            entry.touch();
            self.metrics.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(&entry.health);
        }
        self.metrics.misses.fetch_add(1, Ordering::Relaxed);

        if self.entries.len() >= self.max_entries {
            self.evict_batch();
        }

        // The entry API holds the shard write lock, so concurrent calls
        // for the same domain spawn exactly one monitor.
        match self.entries.entry(Arc::from(name)) {
            Entry::Occupied(occupied) => {
                occupied.get().touch();
                Arc::clone(&occupied.get().health)
            }
            Entry::Vacant(vacant) => {
                let health = Arc::new(DomainHealth::new(vacant.key().clone()));
                let monitor = HealthMonitor::spawn(Arc::clone(&health), Arc::clone(&self.prober));
                self.metrics.insertions.fetch_add(1, Ordering::Relaxed);
                self.metrics
                    .monitors_started
                    .fetch_add(1, Ordering::Relaxed);
                debug!(domain = name, "Started health monitor");
                vacant.insert(CacheEntry::monitored(health.clone(), monitor));
                health
            }
        }
    }

    fn insert_permanent(&self, name: &str, valid: bool) {
        if self.entries.len() >= self.max_entries {
            self.evict_batch();
        }

        let key: Arc<str> = Arc::from(name);
        let health = Arc::new(DomainHealth::permanent(key.clone(), valid));
        if let Some(previous) = self.entries.insert(key, CacheEntry::permanent(health)) {
            previous.on_evict();
            if !previous.is_permanent() {
                self.metrics.monitors_stopped.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.metrics.insertions.fetch_add(1, Ordering::Relaxed);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
