use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use webless_application::ports::DomainHealthCache;

use crate::cache::HealthCache;

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

/// Periodically drops domains nobody has queried for the idle timeout
/// and reports cache health.
pub struct CacheSweepJob {
    cache: Arc<HealthCache>,
    sweep_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(cache: Arc<HealthCache>) -> Self {
        Self {
            cache,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, sweep_secs: u64) -> Self {
        self.sweep_interval_secs = sweep_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.sweep_interval_secs,
            "Starting cache sweep background job"
        );

        let job = Arc::clone(&self);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(job.sweep_interval_secs));
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("CacheSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = job.cache.sweep_idle();
                        let stats = job.cache.metrics().snapshot();
                        if removed > 0 {
                            info!(
                                removed,
                                entries = job.cache.len(),
                                hits = stats.hits,
                                misses = stats.misses,
                                evictions = stats.evictions,
                                live_monitors = stats.live_monitors,
                                "Cache sweep cycle completed"
                            );
                        } else {
                            debug!(
                                entries = job.cache.len(),
                                hits = stats.hits,
                                misses = stats.misses,
                                evictions = stats.evictions,
                                live_monitors = stats.live_monitors,
                                "Cache sweep cycle completed"
                            );
                        }
                    }
                }
            }
        });
    }
}
