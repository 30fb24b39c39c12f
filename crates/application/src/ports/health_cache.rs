use std::sync::Arc;
use webless_domain::DomainHealth;

/// Port over the shared domain-health cache.
///
/// Lookups are synchronous; the query path must never suspend on them.
/// Creating an entry starts its background monitor as a side effect.
pub trait DomainHealthCache: Send + Sync {
    /// Non-mutating lookup. Refreshes the entry's idle clock on a hit.
    fn get(&self, name: &str) -> Option<Arc<DomainHealth>>;

    /// Returns the existing entry or inserts a fresh one, starting its
    /// monitor. At most one entry per name ever exists, even under
    /// concurrent calls for the same name.
    fn get_or_create(&self, name: &str) -> Arc<DomainHealth>;

    /// Inserts a terminal operator-seeded entry: eviction-immune, no
    /// monitor. Replaces any live entry for the name.
    fn insert_permanent(&self, name: &str, valid: bool);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
