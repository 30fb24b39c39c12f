use std::sync::Arc;
use tracing::{info, warn};
use webless_application::{ResolveQueryUseCase, SeedDomainUseCase};
use webless_domain::Config;
use webless_infrastructure::cache::HealthCache;
use webless_infrastructure::dns::{WeblessRequestHandler, ZoneAuthority};
use webless_infrastructure::health::HttpWebsiteProber;
use webless_infrastructure::observer::TracingQueryObserver;

/// Wired object graph for the DNS responder.
pub struct Services {
    pub cache: Arc<HealthCache>,
    pub handler: WeblessRequestHandler,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let prober = Arc::new(HttpWebsiteProber::new(&config.health.user_agent)?);
        let cache = Arc::new(HealthCache::new(&config.cache, prober));

        let mut resolve = ResolveQueryUseCase::new(cache.clone(), config.zone.suffix.clone());
        if config.logging.query_events {
            resolve = resolve.with_observer(Arc::new(TracingQueryObserver));
        }

        let zone = ZoneAuthority::from_config(&config.zone)?;
        let handler = WeblessRequestHandler::new(Arc::new(resolve), Arc::new(zone));

        seed_permanent_verdicts(&cache, config);

        info!(zone = %config.zone.suffix, "Services wired");

        Ok(Self { cache, handler })
    }
}

/// Applies the `[seeds]` lists before the server accepts queries, so
/// operator overrides are in place from the first answer.
fn seed_permanent_verdicts(cache: &Arc<HealthCache>, config: &Config) {
    if config.seeds.valid.is_empty() && config.seeds.invalid.is_empty() {
        return;
    }

    let seed = SeedDomainUseCase::new(cache.clone());
    let mut seeded = 0usize;

    for (names, valid) in [(&config.seeds.valid, true), (&config.seeds.invalid, false)] {
        for name in names {
            match seed.execute(name, valid) {
                Ok(()) => seeded += 1,
                Err(e) => warn!(domain = %name, error = %e, "Skipping unusable seed entry"),
            }
        }
    }

    info!(seeded, "Applied permanent seed verdicts");
}
