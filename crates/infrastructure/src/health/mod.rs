pub mod monitor;
pub mod prober;

pub use monitor::{HealthMonitor, MonitorHandle};
pub use prober::HttpWebsiteProber;
