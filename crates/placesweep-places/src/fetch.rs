//! Fetch adapter: GET a URL and hand back parsed JSON.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;

/// Upper bound on the TCP/TLS connect phase.
const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Capability to GET a URL and parse the body as JSON.
///
/// Transport failures and non-2xx statuses are errors. A body that is not
/// valid JSON resolves to `Ok(None)` so callers can treat it as "no results".
pub trait JsonFetch {
    fn fetch_json(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, PlacesError>> + Send;
}

/// [`JsonFetch`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given transport timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(connect_timeout(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl JsonFetch for HttpFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Option<serde_json::Value>, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: redact_key(url),
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(
                    url = %redact_key(url),
                    error = %e,
                    "response body is not valid JSON — treating as empty"
                );
                Ok(None)
            }
        }
    }
}

/// Connect timeout, never longer than the whole-request timeout.
fn connect_timeout(timeout_secs: u64) -> Duration {
    Duration::from_secs(timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS))
}

/// Renders a URL with the `key` query parameter masked, for logs and errors.
pub(crate) fn redact_key(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" {
                "[redacted]".to_owned()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return masked.to_string();
    }
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
