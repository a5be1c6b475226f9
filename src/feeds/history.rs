use serde_json::Value;

use crate::{
    config::Config,
    feeds::{Feed, Pagination},
    lastfm::{Endpoint, MAX_TRACKS_PER_PAGE, normalize},
    management::FeedKey,
    types::HistoryPayload,
    utils,
};

pub const TRACKS_PER_PAGE: u32 = MAX_TRACKS_PER_PAGE;

/// Scrobble history across up to `page_limit` full pages.
///
/// Only completed scrobbles are kept: the now-playing entry has no timestamp
/// and is dropped, as are repeats seen on overlapping pages. The result is
/// most recent first.
#[derive(Debug, Clone)]
pub struct HistoryFeed {
    pub page_limit: u32,
}

impl HistoryFeed {
    /// History over at most `page_limit` pages; `0` is treated as `1`.
    pub fn new(page_limit: u32) -> Self {
        Self {
            page_limit: page_limit.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.history_pages)
    }
}

impl Feed for HistoryFeed {
    type Payload = HistoryPayload;

    fn key(&self) -> FeedKey {
        FeedKey::History
    }

    fn pagination(&self) -> Pagination {
        Pagination::Pages {
            limit: self.page_limit,
        }
    }

    fn endpoint(&self, page: u32) -> Endpoint {
        Endpoint::RecentTracks {
            limit: TRACKS_PER_PAGE,
            page,
        }
    }

    fn assemble(&self, username: &str, updated: Option<String>, items: Vec<Value>) -> HistoryPayload {
        let mut tracks: Vec<_> = items.iter().map(normalize::normalize_track).collect();
        utils::dedupe_tracks(&mut tracks);
        utils::sort_tracks_by_recency(&mut tracks);

        HistoryPayload {
            username: username.to_string(),
            total: tracks.len(),
            page_limit: self.page_limit,
            tracks_per_page: TRACKS_PER_PAGE,
            updated,
            tracks,
        }
    }
}
