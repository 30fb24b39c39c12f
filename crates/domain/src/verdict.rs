use std::time::Duration;

/// Fixed TTL for malformed queries. The query shape, not any domain's
/// state, is the reason, so downstream resolvers may cache the answer
/// near-indefinitely.
pub const MALFORMED_TTL: Duration = Duration::from_secs(1000 * 24 * 60 * 60);

/// Outcome of resolving one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The email domain, or an ancestor of it, has a reachable website.
    Valid,
    /// No domain in the check chain has a reachable website.
    Invalid,
    /// The query name does not embed a well-formed email domain.
    MalformedQuery,
}

/// Verdict plus the TTL the DNS answer carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub verdict: Verdict,
    pub ttl: Duration,
}

impl Resolution {
    pub fn new(verdict: Verdict, ttl: Duration) -> Self {
        Self { verdict, ttl }
    }

    pub fn malformed() -> Self {
        Self {
            verdict: Verdict::MalformedQuery,
            ttl: MALFORMED_TTL,
        }
    }

    /// TTL in whole seconds, clamped to the range a DNS record carries.
    pub fn ttl_secs(&self) -> u32 {
        self.ttl.as_secs().min(u32::MAX as u64) as u32
    }
}
