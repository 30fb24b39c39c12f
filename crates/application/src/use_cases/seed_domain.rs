use crate::ports::DomainHealthCache;
use std::sync::Arc;
use webless_domain::{DomainError, EmailDomain};

/// Marks a domain permanently valid or invalid, bypassing health checks.
///
/// Used at startup for operator-seeded domains such as the service's own.
pub struct SeedDomainUseCase {
    cache: Arc<dyn DomainHealthCache>,
}

impl SeedDomainUseCase {
    pub fn new(cache: Arc<dyn DomainHealthCache>) -> Self {
        Self { cache }
    }

    pub fn execute(&self, name: &str, valid: bool) -> Result<(), DomainError> {
        let domain = EmailDomain::parse(name)?;
        self.cache.insert_permanent(domain.as_str(), valid);
        tracing::info!(domain = %domain, valid, "Seeded permanent verdict");
        Ok(())
    }
}
