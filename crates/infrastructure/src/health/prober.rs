use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, RANGE};
use tracing::debug;
use webless_application::ports::{ProbeOutcome, WebsiteProber};
use webless_domain::domain_health::CHECK_TIMEOUT;

/// Checks website reachability with a plain HTTP GET.
///
/// The request is deliberately cheap: a single-byte range, no redirect
/// following, and a hard timeout. Any 2xx or 3xx answer proves a live
/// server; redirects to HTTPS or a www host count without being chased.
pub struct HttpWebsiteProber {
    client: reqwest::Client,
}

impl HttpWebsiteProber {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(CHECK_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl WebsiteProber for HttpWebsiteProber {
    async fn probe(&self, domain: &str) -> ProbeOutcome {
        let url = format!("http://{domain}/");

        match self
            .client
            .get(&url)
            .header(RANGE, "bytes=0-0")
            .send()
            .await
        {
            Ok(response) if response.status().as_u16() < 400 => {
                debug!(domain, status = %response.status(), "Website reachable");
                ProbeOutcome::Reachable
            }
            Ok(response) => {
                debug!(domain, status = %response.status(), "Website returned error status");
                ProbeOutcome::Unreachable
            }
            Err(e) => {
                debug!(domain, error = %e, "Website check failed");
                ProbeOutcome::Unreachable
            }
        }
    }
}
