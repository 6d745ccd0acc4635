//! HTTP fetcher implementation
//!
//! This module issues single retried GETs for the harvester:
//! - Building the shared HTTP client with the configured user agent
//! - Exponential backoff on any non-200 outcome
//! - A fixed extra delay for DNS failures, which outlast ordinary blips
//! - A small random post-success jitter to bound the request rate
//!
//! Retry exhaustion is a normal outcome, not an exception: callers get
//! `None` and are expected to skip that unit of work and continue.

use crate::document::Document;
use rand::Rng;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Maximum number of attempts per URL.
const MAX_RETRIES: u32 = 5;

/// Base backoff delay in seconds; doubles each attempt (1, 2, 4, 8, 16).
const BASE_DELAY_SECS: u64 = 1;

/// Extra delay applied when name resolution fails. DNS outages tend to be
/// longer-lived than transient server errors.
const DNS_PENALTY_SECS: u64 = 10;

/// Per-request timeout, independent of the retry envelope.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Builds the shared HTTP client.
///
/// A single connection-reusing client is built once per run and cloned
/// into fetch workers; `reqwest::Client` is safe for concurrent reuse.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, returning the response body after retries.
///
/// HTTP 200 is the only success condition; any other status and any
/// network error is retried with exponential backoff. After success, a
/// uniform 0.1-0.5s jitter is awaited before returning so that batch
/// callers do not hammer the target server.
pub async fn fetch_page(client: &Client, url: &str) -> Option<String> {
    for attempt in 1..=MAX_RETRIES {
        if attempt > 1 {
            tracing::debug!("Attempt {}/{} for {}", attempt, MAX_RETRIES, url);
        }

        match client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => match response.text().await {
                Ok(body) => {
                    let jitter = rand::thread_rng().gen_range(0.1..0.5);
                    tokio::time::sleep(Duration::from_secs_f64(jitter)).await;
                    return Some(body);
                }
                Err(e) => {
                    tracing::warn!("Failed to read body on attempt {} for {}: {}", attempt, url, e);
                }
            },
            Ok(response) => {
                tracing::warn!(
                    "Status {} on attempt {} for {}",
                    response.status(),
                    attempt,
                    url
                );
            }
            Err(e) if is_dns_error(&e) => {
                tracing::warn!("DNS resolution failed on attempt {} for {}: {}", attempt, url, e);
                tokio::time::sleep(Duration::from_secs(DNS_PENALTY_SECS)).await;
            }
            Err(e) => {
                tracing::warn!("Request failed on attempt {} for {}: {}", attempt, url, e);
            }
        }

        // Backoff applies after every failed attempt, the last included,
        // so a caller moving on to its next URL still pauses.
        let delay = BASE_DELAY_SECS << (attempt - 1);
        tracing::debug!("Backing off {}s after attempt {} for {}", delay, attempt, url);
        tokio::time::sleep(Duration::from_secs(delay)).await;
    }

    tracing::warn!("Max retries exceeded for {}", url);
    None
}

/// Fetches a URL and parses the body into a [`Document`].
pub async fn fetch_document(client: &Client, url: &str) -> Option<Document> {
    fetch_page(client, url).await.map(|body| Document::parse(&body))
}

/// Walks the error source chain looking for a name-resolution failure.
fn is_dns_error(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if inner.to_string().to_lowercase().contains("dns") {
            return true;
        }
        source = inner.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("Mozilla/5.0 (test)");
        assert!(client.is_ok());
    }

    #[test]
    fn test_backoff_doubles_each_attempt() {
        // One delay per attempt, the final 16s included.
        let delays: Vec<u64> = (1..=MAX_RETRIES)
            .map(|attempt| BASE_DELAY_SECS << (attempt - 1))
            .collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16]);
        assert_eq!(delays.len(), MAX_RETRIES as usize);
    }
}
