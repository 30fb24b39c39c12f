use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use webless_domain::clock::unix_now_secs;
use webless_domain::DomainHealth;

use crate::health::MonitorHandle;

/// One cached domain and the monitor task that owns its health state.
///
/// Monitored entries carry a handle; permanent seeds carry none. The
/// entry that leaves the map is responsible for cancelling its monitor,
/// which `on_evict` does exactly once per removal.
pub struct CacheEntry {
    pub health: Arc<DomainHealth>,
    last_access_secs: AtomicU64,
    monitor: Option<MonitorHandle>,
}

impl CacheEntry {
    pub fn monitored(health: Arc<DomainHealth>, monitor: MonitorHandle) -> Self {
        Self {
            health,
            last_access_secs: AtomicU64::new(unix_now_secs()),
            monitor: Some(monitor),
        }
    }

    pub fn permanent(health: Arc<DomainHealth>) -> Self {
        Self {
            health,
            last_access_secs: AtomicU64::new(unix_now_secs()),
            monitor: None,
        }
    }

    /// Resets the idle clock. Called on every cache read.
    pub fn touch(&self) {
        self.last_access_secs.store(unix_now_secs(), Ordering::Relaxed);
    }

    pub fn last_access_secs(&self) -> u64 {
        self.last_access_secs.load(Ordering::Relaxed)
    }

    pub fn is_permanent(&self) -> bool {
        self.health.is_permanent()
    }

    /// Stops the monitor on the way out of the map.
    pub fn on_evict(&self) {
        debug_assert!(
            self.monitor.is_some() != self.is_permanent(),
            "monitor presence must match entry kind"
        );
        if let Some(monitor) = &self.monitor {
            monitor.cancel();
        }
    }

    /// Surrenders the monitor handle so shutdown can await the task.
    pub fn into_monitor(self) -> Option<MonitorHandle> {
        self.monitor
    }
}
