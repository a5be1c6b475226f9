//! # Feeds
//!
//! One cache-and-fetch pipeline shared by the three feeds. A [`Feed`] says
//! which endpoint to call, how many pages to walk, which cache file to use and
//! how to turn raw records into its payload; [`Pipeline`] does the rest.
//!
//! ## Decision flow
//!
//! ```text
//! credentials missing ─────────────────────────► MissingConfig (empty, error)
//!        │
//! cache fresh? ── yes ─────────────────────────► Fresh-Hit (cached, fresh=true)
//!        │ no
//! refetch ── ok ── write cache ────────────────► Success (fresh=false)
//!        │ err
//! any cache? ── yes ───────────────────────────► Degraded-Fallback (stale, warning, error)
//!        │ no
//!        └─────────────────────────────────────► Hard-Fail-Soft (empty, error)
//! ```
//!
//! None of these paths return an error: a build always gets a view.

mod albums;
mod history;
mod recent;

use chrono::Utc;
use serde_json::Value;

use crate::{
    config::{Config, Credentials},
    error::RemoteError,
    info,
    lastfm::{Endpoint, LastFmApi, normalize},
    management::{CacheManager, FeedKey, is_fresh, next_cached_at},
    types::{CacheEntry, CacheStatus, FeedPayload, FeedView},
    utils, warning,
};

pub use albums::TopAlbumsFeed;
pub use history::{HistoryFeed, TRACKS_PER_PAGE};
pub use recent::RecentTracksFeed;

/// How many API pages make up one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    Single,
    /// Walk pages sequentially up to `limit` or the reported total.
    Pages { limit: u32 },
}

/// One site data source: what to request and how to shape the result.
pub trait Feed: Send + Sync {
    type Payload: FeedPayload;

    /// Cache file this feed reads and replaces.
    fn key(&self) -> FeedKey;

    fn pagination(&self) -> Pagination;

    /// Request for the 1-based `page`.
    fn endpoint(&self, page: u32) -> Endpoint;

    /// Builds the payload from the raw records of every fetched page, in order.
    fn assemble(&self, username: &str, updated: Option<String>, items: Vec<Value>)
    -> Self::Payload;

    /// Payload served when there is nothing else: no credentials, or a
    /// failed fetch with no cache.
    fn empty(&self, username: &str) -> Self::Payload {
        self.assemble(username, None, Vec::new())
    }

    /// Shown alongside stale data after a failed refetch.
    fn fallback_warning(&self) -> String {
        format!("Serving cached {} due to fetch error.", self.key())
    }
}

/// Runs a [`Feed`] against a client, a cache and the configuration.
pub struct Pipeline<'a, C: LastFmApi + ?Sized> {
    client: &'a C,
    cache: &'a CacheManager,
    config: &'a Config,
}

impl<'a, C: LastFmApi + ?Sized> Pipeline<'a, C> {
    pub fn new(client: &'a C, cache: &'a CacheManager, config: &'a Config) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    /// Produces the current view of `feed`.
    ///
    /// # Arguments
    ///
    /// * `feed` - The feed to serve
    ///
    /// # Returns
    ///
    /// Always a view. Missing credentials, fetch failures and cache problems
    /// are reported through `error` and `cache.warning` next to whatever
    /// data is available: fresh cache, new data, stale cache or an empty
    /// payload, in that order of preference.
    pub async fn run<F: Feed>(&self, feed: &F) -> FeedView<F::Payload> {
        let ttl_minutes = self.config.ttl_minutes;

        let credentials = match self.config.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                let message = e.to_string();
                return FeedView {
                    data: feed.empty(&self.config.username_or_empty()),
                    error: Some(message.clone()),
                    cache: CacheStatus {
                        ttl_minutes,
                        fresh: false,
                        updated: None,
                        warning: None,
                        error: Some(message),
                    },
                };
            }
        };

        let cached: Option<CacheEntry<F::Payload>> = self.cache.read(feed.key()).await;
        if is_fresh(cached.as_ref(), ttl_minutes) {
            if let Some(entry) = cached {
                return FeedView {
                    cache: CacheStatus {
                        ttl_minutes,
                        fresh: true,
                        updated: entry.data.updated().map(str::to_string),
                        warning: None,
                        error: None,
                    },
                    data: entry.data,
                    error: None,
                };
            }
        }

        info!("Refreshing Last.fm {} for {}", feed.key(), credentials.username);
        match self.collect(feed, &credentials).await {
            Ok(items) => {
                let cached_at = next_cached_at(
                    cached.as_ref().and_then(|entry| entry.cached_at),
                    Utc::now().timestamp_millis(),
                );

                let data = feed.assemble(
                    &credentials.username,
                    utils::iso_from_millis(cached_at),
                    items,
                );
                let entry = CacheEntry {
                    cached_at: Some(cached_at),
                    ttl_minutes,
                    data,
                };
                self.cache.write(feed.key(), &entry).await;

                FeedView {
                    cache: CacheStatus {
                        ttl_minutes,
                        fresh: false,
                        updated: entry.data.updated().map(str::to_string),
                        warning: None,
                        error: None,
                    },
                    data: entry.data,
                    error: None,
                }
            }
            Err(e) => {
                let message = e.to_string();
                warning!("Failed to fetch Last.fm {}: {}", feed.key(), message);

                match cached {
                    Some(entry) => FeedView {
                        cache: CacheStatus {
                            ttl_minutes,
                            fresh: false,
                            updated: entry.data.updated().map(str::to_string),
                            warning: Some(feed.fallback_warning()),
                            error: Some(message.clone()),
                        },
                        data: entry.data,
                        error: Some(message),
                    },
                    None => FeedView {
                        data: feed.empty(&credentials.username),
                        error: Some(message.clone()),
                        cache: CacheStatus {
                            ttl_minutes,
                            fresh: false,
                            updated: None,
                            warning: None,
                            error: Some(message),
                        },
                    },
                }
            }
        }
    }

    /// Raw records of every page the feed asks for, page 1 first.
    async fn collect<F: Feed>(
        &self,
        feed: &F,
        credentials: &Credentials,
    ) -> Result<Vec<Value>, RemoteError> {
        let limit = match feed.pagination() {
            Pagination::Single => 1,
            Pagination::Pages { limit } => limit.max(1),
        };

        let mut page = 1;
        let mut total_pages = limit;
        let mut aggregated = Vec::new();

        while page <= limit && page <= total_pages {
            let endpoint = feed.endpoint(page);
            let response = self.request(credentials, &endpoint).await?;

            let items = normalize::list_items(&response, endpoint.root(), endpoint.item_key());
            let count = items.len();
            aggregated.extend(items);

            total_pages = normalize::total_pages(&response, endpoint.root()).unwrap_or(total_pages);

            if count == 0 || page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(aggregated)
    }

    /// One API call, retried on transient failures.
    async fn request(
        &self,
        credentials: &Credentials,
        endpoint: &Endpoint,
    ) -> Result<Value, RemoteError> {
        let mut attempt = 0;
        loop {
            match self.client.fetch(credentials, endpoint).await {
                Err(e) if e.is_transient() && attempt < self.config.retries => {
                    attempt += 1;
                    warning!(
                        "{} (retry {}/{} in {:?})",
                        e,
                        attempt,
                        self.config.retries,
                        self.config.retry_delay
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                result => return result,
            }
        }
    }
}
