use tracing::info;
use webless_application::ports::QueryObserver;
use webless_domain::verdict::Resolution;

/// Emits one log line per request and one per response.
///
/// Wired in only when `logging.query_events` is enabled, so the hot
/// path carries no logging cost otherwise.
pub struct TracingQueryObserver;

impl QueryObserver for TracingQueryObserver {
    fn on_request(&self, query_id: u16, raw_query: &str, email_domain: Option<&str>) {
        match email_domain {
            Some(domain) => {
                info!(id = query_id, query = %raw_query, domain = %domain, "Query received");
            }
            None => {
                info!(id = query_id, query = %raw_query, "Query received outside zone");
            }
        }
    }

    fn on_response(&self, query_id: u16, resolution: &Resolution) {
        info!(
            id = query_id,
            verdict = ?resolution.verdict,
            ttl_secs = resolution.ttl_secs(),
            "Query answered"
        );
    }
}
