use async_trait::async_trait;

/// Outcome of one website reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable,
}

/// Port for checking whether a domain serves a website.
#[async_trait]
pub trait WebsiteProber: Send + Sync {
    /// One bounded GET against `http://<domain>/`. Timeouts and transport
    /// failures come back as `Unreachable`, never as an error.
    async fn probe(&self, domain: &str) -> ProbeOutcome;
}
