mod helpers;

use helpers::MockHealthCache;
use std::sync::Arc;
use webless_application::ports::DomainHealthCache;
use webless_application::use_cases::{ResolveQueryUseCase, SeedDomainUseCase};
use webless_domain::domain_health::PERMANENT_TTL;
use webless_domain::Verdict;

#[test]
fn test_seed_valid_domain() {
    let cache = Arc::new(MockHealthCache::new());
    let seed = SeedDomainUseCase::new(cache.clone());

    seed.execute("webless.org", true).unwrap();

    let resolve = ResolveQueryUseCase::new(cache, "web.webless.org");
    let resolution = resolve.execute(1, "webless.org.web.webless.org");
    assert_eq!(resolution.verdict, Verdict::Valid);
    assert_eq!(resolution.ttl, PERMANENT_TTL);
}

#[test]
fn test_seed_invalid_domain() {
    let cache = Arc::new(MockHealthCache::new());
    let seed = SeedDomainUseCase::new(cache.clone());

    seed.execute("spammer.example", false).unwrap();

    let resolve = ResolveQueryUseCase::new(cache, "web.webless.org");
    let resolution = resolve.execute(1, "spammer.example.web.webless.org");
    assert_eq!(resolution.verdict, Verdict::Invalid);
    assert_eq!(resolution.ttl, PERMANENT_TTL);
}

#[test]
fn test_seed_normalizes_name() {
    let cache = Arc::new(MockHealthCache::new());
    let seed = SeedDomainUseCase::new(cache.clone());

    seed.execute("Webless.ORG.", true).unwrap();

    let resolve = ResolveQueryUseCase::new(cache, "web.webless.org");
    let resolution = resolve.execute(1, "webless.org.web.webless.org");
    assert_eq!(resolution.verdict, Verdict::Valid);
    assert_eq!(resolution.ttl, PERMANENT_TTL);
}

#[test]
fn test_seed_rejects_single_label() {
    let cache = Arc::new(MockHealthCache::new());
    let seed = SeedDomainUseCase::new(cache.clone());

    assert!(seed.execute("notadomain", true).is_err());
    assert_eq!(cache.len(), 0);
}
