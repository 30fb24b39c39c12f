use crate::ports::{DomainHealthCache, QueryObserver};
use std::sync::Arc;
use std::time::Duration;
use webless_domain::{EmailDomain, Resolution, Verdict};

/// Decides the verdict and TTL for one inbound query.
///
/// Purely synchronous: the query path only reads health snapshots and
/// triggers entry creation, it never waits on a check.
pub struct ResolveQueryUseCase {
    cache: Arc<dyn DomainHealthCache>,
    observer: Option<Arc<dyn QueryObserver>>,
    zone_suffix: String,
}

impl ResolveQueryUseCase {
    pub fn new(cache: Arc<dyn DomainHealthCache>, zone_suffix: impl Into<String>) -> Self {
        Self {
            cache,
            observer: None,
            zone_suffix: zone_suffix.into(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn QueryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn execute(&self, query_id: u16, raw_query: &str) -> Resolution {
        let email_domain = match EmailDomain::from_query(raw_query, &self.zone_suffix) {
            Ok(domain) => domain,
            Err(e) => {
                if let Some(observer) = &self.observer {
                    observer.on_request(query_id, raw_query, None);
                }
                tracing::debug!(query = %raw_query, error = %e, "Malformed query");
                let resolution = Resolution::malformed();
                if let Some(observer) = &self.observer {
                    observer.on_response(query_id, &resolution);
                }
                return resolution;
            }
        };

        if let Some(observer) = &self.observer {
            observer.on_request(query_id, raw_query, Some(email_domain.as_str()));
        }

        let resolution = self.decide(&email_domain);

        if let Some(observer) = &self.observer {
            observer.on_response(query_id, &resolution);
        }
        resolution
    }

    /// Walks the check chain and aggregates cached health into a verdict.
    ///
    /// Validity short-circuits: one valid ancestor makes the whole chain
    /// valid, with the longest-lived confirmation deciding the TTL. A fully
    /// known chain with no valid member is invalid, with the shortest TTL so
    /// a recovering domain is re-asked soonest. Otherwise unseen domains tip
    /// the verdict to valid for their grace window.
    fn decide(&self, email_domain: &EmailDomain) -> Resolution {
        let mut max_valid_ttl: Option<Duration> = None;
        let mut min_invalid_ttl: Option<Duration> = None;
        let mut unseen: Vec<&str> = Vec::new();

        for test_domain in email_domain.check_chain() {
            match self.cache.get(test_domain) {
                Some(health) => {
                    let ttl = health.ttl();
                    if health.is_valid() {
                        max_valid_ttl = Some(max_valid_ttl.map_or(ttl, |t| t.max(ttl)));
                    } else {
                        min_invalid_ttl = Some(min_invalid_ttl.map_or(ttl, |t| t.min(ttl)));
                    }
                }
                None => unseen.push(test_domain),
            }
        }

        // Every unseen domain starts its checks now, whatever the verdict.
        let mut grace_ttl: Option<Duration> = None;
        for name in unseen {
            let health = self.cache.get_or_create(name);
            let ttl = health.ttl();
            grace_ttl = Some(grace_ttl.map_or(ttl, |t| t.max(ttl)));
        }

        match (max_valid_ttl, grace_ttl, min_invalid_ttl) {
            (Some(ttl), _, _) => Resolution::new(Verdict::Valid, ttl),
            (None, Some(ttl), _) => Resolution::new(Verdict::Valid, ttl),
            (None, None, Some(ttl)) => Resolution::new(Verdict::Invalid, ttl),
            // A chain is never empty, so this arm is unreachable for a
            // well-formed domain. Answer as a format error over panicking.
            (None, None, None) => Resolution::malformed(),
        }
    }
}
