//! Bounded parallel fetch coordinator
//!
//! Fans a list of URLs out across a semaphore-bounded worker pool and
//! collects a URL-to-document map. Partial failure of one URL never
//! aborts or omits results for the others: every input URL appears in the
//! output map exactly once, failed fetches mapping to `None`.

use crate::document::Document;
use crate::fetch::fetcher::fetch_page;
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fetches a batch of URLs with at most `max_concurrency` in flight.
///
/// Workers return raw bodies; parsing happens here on the calling task,
/// since the parsed document type is not `Send`. No completion ordering
/// is guaranteed - the returned map is the only externally visible result.
pub async fn fetch_all(
    client: &Client,
    urls: &[String],
    max_concurrency: usize,
) -> HashMap<String, Option<Document>> {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut workers = JoinSet::new();
    let mut seen = HashSet::new();

    for url in urls {
        if !seen.insert(url.clone()) {
            continue;
        }
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break, // semaphore closed; unreachable in practice
        };
        let client = client.clone();
        let url = url.clone();
        workers.spawn(async move {
            let _permit = permit;
            let body = fetch_page(&client, &url).await;
            (url, body)
        });
    }

    let mut results: HashMap<String, Option<Document>> = HashMap::new();
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((url, body)) => {
                results.insert(url, body.map(|b| Document::parse(&b)));
            }
            Err(e) => {
                tracing::error!("Fetch worker failed: {}", e);
            }
        }
    }

    // Cardinality guarantee: a lost worker still yields an entry.
    for url in urls {
        results.entry(url.clone()).or_insert(None);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::build_http_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_every_input_url_maps_exactly_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><p>ok</p></html>"))
            .mount(&server)
            .await;
        // /missing is not mounted; the fetcher exhausts its retries on it.

        let ok = format!("{}/ok", server.uri());
        let missing = format!("{}/missing", server.uri());
        let urls = vec![ok.clone(), ok.clone(), missing.clone()];

        let client = build_http_client("TestAgent/1.0").unwrap();
        let results = fetch_all(&client, &urls, 2).await;

        // Duplicates collapse; failures map to None instead of vanishing.
        assert_eq!(results.len(), 2);
        assert!(results.get(&ok).unwrap().is_some());
        assert!(results.contains_key(&missing));
        assert!(results.get(&missing).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_batch_yields_empty_map() {
        let client = build_http_client("TestAgent/1.0").unwrap();
        let results = fetch_all(&client, &[], 4).await;
        assert!(results.is_empty());
    }
}
