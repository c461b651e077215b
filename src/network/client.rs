use crate::network::errors::UpstreamError;
use crate::network::identity::RequestIdentity;
use crate::refinery::tables::{extract_tables_from_stream, TableCandidate};
use futures::TryStreamExt;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

// * Result of one upstream fetch
#[derive(Debug, Clone)]
pub struct FetchedTables {
    pub tables: Vec<TableCandidate>,
    pub bytes: u64,
    pub elapsed: Duration,
}

// * HTTP client for the port authority listing.
// * The body is never buffered whole: it is streamed straight into the table extractor.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    inner: Client,
}

impl UpstreamClient {
    // * Builds the client with the request identity and an overall timeout.
    pub fn new(identity: &RequestIdentity, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .default_headers(identity.headers()?)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .build()?;

        Ok(Self { inner: client })
    }

    // * Fetches the page and extracts its tables while the body arrives.
    // * Non-2xx responses and empty bodies are upstream failures; nothing is retried here.
    pub async fn fetch_tables(&self, url: &Url) -> Result<FetchedTables, UpstreamError> {
        let started = Instant::now();
        let resp = self.inner.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Upstream request failed");
            UpstreamError::from(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned non-success status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let mut bytes: u64 = 0;
        let body = resp
            .bytes_stream()
            .inspect_ok(|chunk| bytes += chunk.len() as u64);
        let tables = extract_tables_from_stream(body).await?;

        if bytes == 0 {
            return Err(UpstreamError::EmptyDocument);
        }

        let elapsed = started.elapsed();
        debug!(url = %url, bytes, "Upstream body consumed");
        info!(
            url = %url,
            tables = tables.len(),
            bytes,
            elapsed_ms = elapsed.as_millis() as u64,
            "Upstream page extracted"
        );

        Ok(FetchedTables {
            tables,
            bytes,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::DEFAULT_USER_AGENT;

    #[test]
    fn test_client_initialization() {
        let identity = RequestIdentity::new(DEFAULT_USER_AGENT);
        let client = UpstreamClient::new(&identity, Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_identity() {
        let identity = RequestIdentity::new("bad\r\nagent");
        let result = UpstreamClient::new(&identity, Duration::from_secs(5));
        assert!(matches!(result, Err(UpstreamError::Header(_))));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_an_upstream_error() {
        let identity = RequestIdentity::new(DEFAULT_USER_AGENT);
        let client = UpstreamClient::new(&identity, Duration::from_secs(2)).unwrap();
        // * Port 9 (discard) on localhost is closed in test environments
        let url = Url::parse("http://127.0.0.1:9/lineup").unwrap();

        let err = client.fetch_tables(&url).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Reqwest(_)));
    }
}
