use serde_json::Value;

use crate::{
    config::Config,
    feeds::{Feed, Pagination},
    lastfm::{Endpoint, normalize},
    management::FeedKey,
    types::RecentTracksPayload,
};

/// The latest scrobbles, first page only.
///
/// Every record is kept in API order, including the currently playing track
/// which has no timestamp.
#[derive(Debug, Clone)]
pub struct RecentTracksFeed {
    pub limit: u32,
}

impl RecentTracksFeed {
    pub fn from_config(config: &Config) -> Self {
        Self {
            limit: config.recent_limit,
        }
    }
}

impl Feed for RecentTracksFeed {
    type Payload = RecentTracksPayload;

    fn key(&self) -> FeedKey {
        FeedKey::RecentTracks
    }

    fn pagination(&self) -> Pagination {
        Pagination::Single
    }

    fn endpoint(&self, page: u32) -> Endpoint {
        Endpoint::RecentTracks {
            limit: self.limit,
            page,
        }
    }

    fn assemble(
        &self,
        username: &str,
        updated: Option<String>,
        items: Vec<Value>,
    ) -> RecentTracksPayload {
        RecentTracksPayload {
            username: username.to_string(),
            updated,
            tracks: items.iter().map(normalize::normalize_track).collect(),
        }
    }

    fn fallback_warning(&self) -> String {
        "Serving cached data due to fetch error.".to_string()
    }
}
