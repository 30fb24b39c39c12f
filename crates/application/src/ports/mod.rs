mod health_cache;
mod query_observer;
mod website_prober;

pub use health_cache::DomainHealthCache;
pub use query_observer::QueryObserver;
pub use website_prober::{ProbeOutcome, WebsiteProber};
