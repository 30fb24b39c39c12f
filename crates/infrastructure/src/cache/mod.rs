pub mod entry;
pub mod metrics;
pub mod store;

pub use entry::CacheEntry;
pub use metrics::{CacheMetrics, CacheMetricsSnapshot};
pub use store::HealthCache;
