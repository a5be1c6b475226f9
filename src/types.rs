use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub now_playing: bool,
    /// Scrobble time in epoch seconds; absent while the track is playing.
    #[serde(default)]
    pub uts: Option<i64>,
    #[serde(default)]
    pub played_at: Option<String>,
}

impl Track {
    /// Identity used to collapse the same scrobble seen on overlapping pages.
    /// `None` for tracks without a usable timestamp (now playing, or `0`).
    pub fn dedupe_key(&self) -> Option<(i64, String, String)> {
        self.uts
            .filter(|uts| *uts != 0)
            .map(|uts| (uts, self.name.clone(), self.artist.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub playcount: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Common surface of the three feed payloads.
pub trait FeedPayload: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// ISO-8601 time of the fetch that produced this payload.
    fn updated(&self) -> Option<&str>;

    /// Number of records carried.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTracksPayload {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl FeedPayload for RecentTracksPayload {
    fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    fn len(&self) -> usize {
        self.tracks.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPayload {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub page_limit: u32,
    #[serde(default)]
    pub tracks_per_page: u32,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl FeedPayload for HistoryPayload {
    fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    fn len(&self) -> usize {
        self.tracks.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopAlbumsPayload {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub albums: Vec<Album>,
}

impl FeedPayload for TopAlbumsPayload {
    fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    fn len(&self) -> usize {
        self.albums.len()
    }
}

/// On-disk record for one feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    /// Epoch milliseconds of the write; entries without it are never fresh.
    #[serde(default)]
    pub cached_at: Option<i64>,
    #[serde(default)]
    pub ttl_minutes: u32,
    pub data: T,
}

/// Cache annotation on every view handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub ttl_minutes: u32,
    pub fresh: bool,
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What a template receives for one feed: the payload fields flattened at the
/// top level, an optional error and the cache annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedView<P> {
    #[serde(flatten)]
    pub data: P,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub cache: CacheStatus,
}

/// All three feeds, as written by `export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    pub recent_tracks: FeedView<RecentTracksPayload>,
    pub history: FeedView<HistoryPayload>,
    pub top_albums: FeedView<TopAlbumsPayload>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub played: String,
    pub artist: String,
    pub track: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub rank: usize,
    pub artist: String,
    pub album: String,
    pub plays: u64,
}

#[derive(Tabled)]
pub struct CacheTableRow {
    pub feed: String,
    pub file: String,
    pub age: String,
    pub fresh: String,
    pub records: String,
}
