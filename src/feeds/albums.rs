use serde_json::Value;

use crate::{
    config::Config,
    feeds::{Feed, Pagination},
    lastfm::{Endpoint, normalize},
    management::FeedKey,
    types::TopAlbumsPayload,
};

/// Most played albums over `period`, in the API's ranking order.
#[derive(Debug, Clone)]
pub struct TopAlbumsFeed {
    pub period: String,
    pub limit: u32,
}

impl TopAlbumsFeed {
    pub fn from_config(config: &Config) -> Self {
        Self {
            period: config.top_albums_period.clone(),
            limit: config.top_albums_limit,
        }
    }
}

impl Feed for TopAlbumsFeed {
    type Payload = TopAlbumsPayload;

    fn key(&self) -> FeedKey {
        FeedKey::TopAlbums
    }

    fn pagination(&self) -> Pagination {
        Pagination::Single
    }

    fn endpoint(&self, _page: u32) -> Endpoint {
        Endpoint::TopAlbums {
            period: self.period.clone(),
            limit: self.limit,
        }
    }

    fn assemble(
        &self,
        username: &str,
        updated: Option<String>,
        items: Vec<Value>,
    ) -> TopAlbumsPayload {
        TopAlbumsPayload {
            username: username.to_string(),
            period: self.period.clone(),
            limit: self.limit,
            updated,
            albums: items.iter().map(normalize::normalize_album).collect(),
        }
    }

    fn fallback_warning(&self) -> String {
        "Serving cached albums due to fetch error.".to_string()
    }
}
