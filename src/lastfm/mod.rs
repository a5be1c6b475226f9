//! # Last.fm Integration Module
//!
//! Thin access layer over the Last.fm web API (`ws.audioscrobbler.com/2.0`).
//! Two read-only methods are used, both keyed by user name and a static API
//! key:
//!
//! - `user.getrecenttracks` - paginated scrobbles, newest first, with the
//!   currently playing track (if any) on top and no timestamp
//! - `user.gettopalbums` - most played albums over a period
//!
//! ## Layers
//!
//! ```text
//! Feeds (orchestrator)
//!      ↓
//! LastFmApi trait  ── HttpClient (reqwest) in production, fakes in tests
//!      ↓
//! normalize        ── serde_json::Value -> Track / Album
//! ```
//!
//! The client returns the raw JSON tree untouched. All tolerance for odd
//! shapes (single objects instead of lists, empty image URLs, string
//! numbers) lives in [`normalize`].

mod client;
pub mod normalize;

use async_trait::async_trait;
use serde_json::Value;

use crate::{config::Credentials, error::RemoteError};

pub use client::{HttpClient, parse_body};

pub const METHOD_RECENT_TRACKS: &str = "user.getrecenttracks";
pub const METHOD_TOP_ALBUMS: &str = "user.gettopalbums";

/// API maximum for `user.getrecenttracks` page size.
pub const MAX_TRACKS_PER_PAGE: u32 = 200;
/// API maximum for `user.gettopalbums` page size.
pub const MAX_ALBUMS_PER_PAGE: u32 = 1000;

/// One request against the API, minus credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    RecentTracks { limit: u32, page: u32 },
    TopAlbums { period: String, limit: u32 },
}

impl Endpoint {
    /// Last.fm method name sent as the `method` query parameter.
    pub fn method(&self) -> &'static str {
        match self {
            Endpoint::RecentTracks { .. } => METHOD_RECENT_TRACKS,
            Endpoint::TopAlbums { .. } => METHOD_TOP_ALBUMS,
        }
    }

    /// Object key wrapping the response (`recenttracks` / `topalbums`).
    pub fn root(&self) -> &'static str {
        match self {
            Endpoint::RecentTracks { .. } => "recenttracks",
            Endpoint::TopAlbums { .. } => "topalbums",
        }
    }

    /// Key of the record list inside [`Endpoint::root`].
    pub fn item_key(&self) -> &'static str {
        match self {
            Endpoint::RecentTracks { .. } => "track",
            Endpoint::TopAlbums { .. } => "album",
        }
    }

    /// Method-specific query parameters, limits clamped to the API maximum.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::RecentTracks { limit, page } => vec![
                ("limit", (*limit).clamp(1, MAX_TRACKS_PER_PAGE).to_string()),
                ("page", (*page).max(1).to_string()),
            ],
            Endpoint::TopAlbums { period, limit } => vec![
                ("period", period.clone()),
                ("limit", (*limit).clamp(1, MAX_ALBUMS_PER_PAGE).to_string()),
            ],
        }
    }

    /// Full query string parameters for `credentials`.
    ///
    /// # Arguments
    ///
    /// * `credentials` - API key and user name to embed in the request
    ///
    /// # Returns
    ///
    /// `method`, `user`, `api_key` and `format=json`, followed by
    /// [`Endpoint::params`].
    ///
    /// # Example
    ///
    /// ```
    /// use lastfm_sitedata::{config::Credentials, lastfm::Endpoint};
    ///
    /// let credentials = Credentials {
    ///     api_key: "key".to_string(),
    ///     username: "alice".to_string(),
    /// };
    /// let query = Endpoint::RecentTracks { limit: 20, page: 1 }.query(&credentials);
    /// assert_eq!(query[0], ("method", "user.getrecenttracks".to_string()));
    /// ```
    pub fn query(&self, credentials: &Credentials) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("method", self.method().to_string()),
            ("user", credentials.username.clone()),
            ("api_key", credentials.api_key.clone()),
            ("format", "json".to_string()),
        ];
        query.extend(self.params());
        query
    }
}

/// Read access to the Last.fm API.
#[async_trait]
pub trait LastFmApi: Send + Sync {
    /// Performs one GET and returns the decoded JSON body.
    ///
    /// # Arguments
    ///
    /// * `credentials` - API key and user the request is made for
    /// * `endpoint` - Method and its parameters
    ///
    /// # Errors
    ///
    /// Any [`RemoteError`]: a non-2xx status, an API error envelope, a
    /// transport failure or an undecodable body. Implementations do not retry.
    async fn fetch(&self, credentials: &Credentials, endpoint: &Endpoint)
    -> Result<Value, RemoteError>;
}
