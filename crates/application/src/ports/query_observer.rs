use webless_domain::Resolution;

/// Diagnostic hooks fired around each resolved query.
///
/// Implementations must be cheap and must never influence the outcome.
pub trait QueryObserver: Send + Sync {
    /// A query arrived. `email_domain` is `None` when extraction failed.
    fn on_request(&self, query_id: u16, raw_query: &str, email_domain: Option<&str>);

    /// A verdict was decided for the query.
    fn on_response(&self, query_id: u16, resolution: &Resolution);
}
