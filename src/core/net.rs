// src/core/net.rs
// Blocking HTTP GET. One client per run, shared by every worker thread.

use reqwest::blocking::Client;
use tracing::info_span;

use crate::config::consts::USER_AGENT;
use crate::error::ScrapeError;

/// Anything that can turn a URL into page text.
/// Workers borrow one fetcher concurrently, hence `Send + Sync`.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Library defaults for redirects and timeouts; only the User-Agent is set.
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScrapeError::Unexpected(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    /// Perform a single GET and return the response body.
    ///
    /// No retry, no caching. Any non-2xx status is a `Network` error.
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let _span = info_span!("fetch", url).entered();
        let network = |reason: String| ScrapeError::Network { url: s!(url), reason };

        let resp = self.client.get(url).send().map_err(|e| network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(network(format!("HTTP {status}")));
        }
        resp.text().map_err(|e| network(format!("failed to read response body: {e}")))
    }
}
