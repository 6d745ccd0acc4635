//! Shared fighter cache
//!
//! Fighter profiles are reached from many fights; each profile page is
//! fetched at most once per run. The cache is keyed by profile link and
//! shared across the run behind an async mutex, so concurrent resolvers
//! for the same fighter serialize instead of double-fetching.

use crate::document::Document;
use crate::extract::extract_fighter;
use crate::fetch::fetch_document;
use crate::model::Fighter;
use reqwest::Client;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct FighterCache {
    inner: Mutex<HashMap<String, Fighter>>,
}

impl FighterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fighter is already cached.
    pub async fn contains(&self, link: &str) -> bool {
        self.inner.lock().await.contains_key(link)
    }

    /// Number of cached fighters.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Returns the fighter for `link`, extracting and caching on miss.
    ///
    /// A prefetched profile document, when the caller already has one,
    /// avoids a fetch on miss; otherwise the page is fetched here. A
    /// profile that cannot be fetched yields an unresolved record (link
    /// only), which is returned but not cached, so a later fight can
    /// retry the fetch.
    pub async fn resolve(
        &self,
        client: &Client,
        link: &str,
        prefetched: Option<&Document>,
    ) -> Fighter {
        let mut cache = self.inner.lock().await;
        if let Some(fighter) = cache.get(link) {
            return fighter.clone();
        }

        let fighter = match prefetched {
            Some(doc) => extract_fighter(doc, link),
            None => match fetch_document(client, link).await {
                Some(doc) => extract_fighter(&doc, link),
                None => {
                    tracing::warn!("Fighter profile unreachable, recording link only: {}", link);
                    Fighter::unresolved(link)
                }
            },
        };

        if fighter.name.is_some() {
            cache.insert(link.to_string(), fighter.clone());
        } else {
            tracing::debug!("Fighter left uncached for retry: {}", link);
        }
        fighter
    }
}
