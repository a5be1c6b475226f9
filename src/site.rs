//! Site-data accessors.
//!
//! This is the whole contract a template layer needs: one async, argument-less
//! call per feed returning a serializable view. Cache locations and raw API
//! shapes stay behind it.

use crate::{
    config::Config,
    error::RemoteError,
    feeds::{HistoryFeed, Pipeline, RecentTracksFeed, TopAlbumsFeed},
    lastfm::{HttpClient, LastFmApi},
    management::CacheManager,
    types::{FeedView, HistoryPayload, RecentTracksPayload, SiteSnapshot, TopAlbumsPayload},
};

/// Entry point for a static-site build.
///
/// # Example
///
/// ```no_run
/// use lastfm_sitedata::{config::Config, site::SiteData};
///
/// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
/// let site = SiteData::from_config(Config::from_env())?;
/// let history = site.history().await;
/// println!("{}", serde_json::to_string(&history)?);
/// # Ok(())
/// # }
/// ```
pub struct SiteData<C = HttpClient> {
    config: Config,
    client: C,
    cache: CacheManager,
}

impl SiteData<HttpClient> {
    /// Production setup with an [`HttpClient`] built from `config`.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn from_config(config: Config) -> Result<Self, RemoteError> {
        let client = HttpClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }
}

impl<C: LastFmApi> SiteData<C> {
    /// Same as [`SiteData::from_config`] with any [`LastFmApi`] client.
    pub fn with_client(config: Config, client: C) -> Self {
        let cache = CacheManager::new(config.cache_dir.clone());
        Self {
            config,
            client,
            cache,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The latest scrobbles, now playing included.
    pub async fn recent_tracks(&self) -> FeedView<RecentTracksPayload> {
        self.pipeline()
            .run(&RecentTracksFeed::from_config(&self.config))
            .await
    }

    /// Deduplicated scrobble history across `config.history_pages` pages.
    pub async fn history(&self) -> FeedView<HistoryPayload> {
        self.pipeline()
            .run(&HistoryFeed::from_config(&self.config))
            .await
    }

    /// Top albums for `config.top_albums_period`.
    pub async fn top_albums(&self) -> FeedView<TopAlbumsPayload> {
        self.pipeline()
            .run(&TopAlbumsFeed::from_config(&self.config))
            .await
    }

    /// All three feeds, fetched concurrently. Each feed owns its own cache
    /// file, so they do not interfere.
    pub async fn snapshot(&self) -> SiteSnapshot {
        let (recent_tracks, history, top_albums) =
            tokio::join!(self.recent_tracks(), self.history(), self.top_albums());

        SiteSnapshot {
            recent_tracks,
            history,
            top_albums,
        }
    }

    fn pipeline(&self) -> Pipeline<'_, C> {
        Pipeline::new(&self.client, &self.cache, &self.config)
    }
}
