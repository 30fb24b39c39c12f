mod helpers;

use helpers::{MockHealthCache, RecordingObserver};
use std::sync::Arc;
use webless_application::ports::DomainHealthCache;
use webless_application::use_cases::ResolveQueryUseCase;
use webless_domain::domain_health::PERMANENT_TTL;
use webless_domain::verdict::MALFORMED_TTL;
use webless_domain::Verdict;

const SUFFIX: &str = "web.webless.org";

fn make_use_case(cache: Arc<MockHealthCache>) -> ResolveQueryUseCase {
    ResolveQueryUseCase::new(cache, SUFFIX)
}

// ── malformed queries ──────────────────────────────────────────────────────

#[test]
fn test_single_label_prefix_is_malformed() {
    let cache = Arc::new(MockHealthCache::new());
    let use_case = make_use_case(cache.clone());

    let resolution = use_case.execute(1, "notadomain.web.webless.org");

    assert_eq!(resolution.verdict, Verdict::MalformedQuery);
    assert_eq!(resolution.ttl, MALFORMED_TTL);
    assert_eq!(cache.len(), 0);
    assert!(cache.created().is_empty());
}

#[test]
fn test_query_outside_zone_is_malformed() {
    let cache = Arc::new(MockHealthCache::new());
    let use_case = make_use_case(cache.clone());

    let resolution = use_case.execute(1, "mail.example.com.other.zone");

    assert_eq!(resolution.verdict, Verdict::MalformedQuery);
    assert_eq!(cache.len(), 0);
}

// ── grace period for never-seen domains ────────────────────────────────────

#[test]
fn test_never_seen_domain_defaults_to_valid() {
    let cache = Arc::new(MockHealthCache::new());
    let use_case = make_use_case(cache.clone());

    let resolution = use_case.execute(1, "newsite.example.org.web.webless.org");

    assert_eq!(resolution.verdict, Verdict::Valid);
    // Grace TTL comes from the freshly created entries.
    let ttl = resolution.ttl.as_secs();
    assert!((470..=480).contains(&ttl), "unexpected ttl {ttl}");

    // Both chain members now have checks running, general first.
    assert_eq!(cache.created(), vec!["example.org", "newsite.example.org"]);
}

#[test]
fn test_unseen_member_tips_partially_known_chain_to_valid() {
    let cache = Arc::new(MockHealthCache::new());
    cache.insert_failing("example.com", 4);

    let use_case = make_use_case(cache.clone());
    let resolution = use_case.execute(1, "shop.example.com.web.webless.org");

    assert_eq!(resolution.verdict, Verdict::Valid);
    assert_eq!(cache.created(), vec!["shop.example.com"]);
}

// ── aggregation over cached chains ─────────────────────────────────────────

#[test]
fn test_ancestor_validity_wins_over_invalid_child() {
    let cache = Arc::new(MockHealthCache::new());
    cache.insert_valid("groupon.com");
    cache.insert_failing("mail.groupon.com", 4);

    let use_case = make_use_case(cache.clone());
    let resolution = use_case.execute(1, "mail.groupon.com.web.webless.org");

    assert_eq!(resolution.verdict, Verdict::Valid);
    // TTL is the valid ancestor's, not the failing child's.
    assert!(resolution.ttl.as_secs() > 300_000);
    assert!(cache.created().is_empty());
}

#[test]
fn test_fully_known_invalid_chain_takes_shortest_ttl() {
    let cache = Arc::new(MockHealthCache::new());
    // Fresh failure streak: short TTL. Degraded after a success: long TTL.
    cache.insert_failing("example.com", 4);
    cache.insert_degraded("mail.example.com", 13);

    let use_case = make_use_case(cache.clone());
    let resolution = use_case.execute(1, "mail.example.com.web.webless.org");

    assert_eq!(resolution.verdict, Verdict::Invalid);
    let ttl = resolution.ttl.as_secs();
    assert!(ttl < 1000, "expected the short TTL, got {ttl}");
    assert!(cache.created().is_empty());
}

#[test]
fn test_creation_happens_even_when_ancestor_already_valid() {
    let cache = Arc::new(MockHealthCache::new());
    cache.insert_valid("example.com");

    let use_case = make_use_case(cache.clone());
    let resolution = use_case.execute(1, "www.example.com.web.webless.org");

    assert_eq!(resolution.verdict, Verdict::Valid);
    assert_eq!(cache.created(), vec!["www.example.com"]);
}

#[test]
fn test_permanent_invalid_answers_with_permanent_ttl() {
    let cache = Arc::new(MockHealthCache::new());
    cache.insert_permanent("spammer.example", false);

    let use_case = make_use_case(cache.clone());
    let resolution = use_case.execute(1, "spammer.example.web.webless.org");

    assert_eq!(resolution.verdict, Verdict::Invalid);
    assert_eq!(resolution.ttl, PERMANENT_TTL);
}

#[test]
fn test_permanent_valid_answers_with_permanent_ttl() {
    let cache = Arc::new(MockHealthCache::new());
    cache.insert_permanent("webless.org", true);

    let use_case = make_use_case(cache.clone());
    let resolution = use_case.execute(1, "webless.org.web.webless.org");

    assert_eq!(resolution.verdict, Verdict::Valid);
    assert_eq!(resolution.ttl, PERMANENT_TTL);
}

// ── observer hooks ─────────────────────────────────────────────────────────

#[test]
fn test_observer_sees_request_and_response() {
    let cache = Arc::new(MockHealthCache::new());
    cache.insert_valid("groupon.com");
    let observer = Arc::new(RecordingObserver::new());

    let use_case = make_use_case(cache).with_observer(observer.clone());
    let resolution = use_case.execute(7, "mail.groupon.com.web.webless.org");

    let requests = observer.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, 7);
    assert_eq!(requests[0].1, "mail.groupon.com.web.webless.org");
    assert_eq!(requests[0].2.as_deref(), Some("mail.groupon.com"));

    let responses = observer.responses();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].0, 7);
    assert_eq!(responses[0].1, resolution);
}

#[test]
fn test_observer_malformed_query_has_no_email_domain() {
    let cache = Arc::new(MockHealthCache::new());
    let observer = Arc::new(RecordingObserver::new());

    let use_case = make_use_case(cache).with_observer(observer.clone());
    use_case.execute(9, "nonsense.web.webless.org");

    let requests = observer.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].2, None);

    let responses = observer.responses();
    assert_eq!(responses[0].1.verdict, Verdict::MalformedQuery);
}
