#![allow(dead_code)]

use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use lastfm_sitedata::{
    config::{Config, Credentials},
    error::RemoteError,
    lastfm::{Endpoint, LastFmApi},
};
use serde_json::{Value, json};
use tempfile::TempDir;

type Handler = Box<dyn Fn(&Endpoint) -> Result<Value, RemoteError> + Send + Sync>;

/// In-memory [`LastFmApi`] that records every request.
pub struct FakeApi {
    handler: Handler,
    calls: Mutex<Vec<Endpoint>>,
}

impl FakeApi {
    /// Answers by inspecting the request.
    pub fn routed<F>(handler: F) -> Self
    where
        F: Fn(&Endpoint) -> Result<Value, RemoteError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers with `responses` in order, then with 500s.
    pub fn sequence(responses: Vec<Result<Value, RemoteError>>) -> Self {
        let queue = Mutex::new(VecDeque::from(responses));
        Self::routed(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(status_error(500)))
        })
    }

    /// Fails every request with `status`.
    pub fn failing(status: u16) -> Self {
        Self::routed(move |_| Err(status_error(status)))
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LastFmApi for FakeApi {
    async fn fetch(
        &self,
        _credentials: &Credentials,
        endpoint: &Endpoint,
    ) -> Result<Value, RemoteError> {
        self.calls.lock().unwrap().push(endpoint.clone());
        (self.handler)(endpoint)
    }
}

pub fn status_error(status: u16) -> RemoteError {
    RemoteError::Status {
        status,
        status_text: "Error".to_string(),
        message: None,
    }
}

/// A not yet created cache directory inside a scratch root. The root and
/// everything under it is removed when the returned `TempDir` is dropped.
pub fn temp_cache_dir(name: &str) -> (TempDir, PathBuf) {
    let root = tempfile::Builder::new()
        .prefix("lastfm-sitedata-")
        .tempdir()
        .unwrap();
    let dir = root.path().join(name);
    (root, dir)
}

pub fn test_config(cache_dir: PathBuf) -> Config {
    Config {
        api_key: Some("test-key".to_string()),
        username: Some("alice".to_string()),
        cache_dir,
        retry_delay: Duration::ZERO,
        ..Config::default()
    }
}

pub fn raw_track(name: &str, artist: &str, uts: Option<i64>) -> Value {
    let mut track = json!({
        "name": name,
        "artist": { "#text": artist, "mbid": "" },
        "album": { "#text": format!("{name} (album)") },
        "url": format!("https://www.last.fm/music/{artist}/_/{name}"),
        "image": [
            { "size": "small", "#text": format!("https://img/{name}/34.png") },
            { "size": "extralarge", "#text": format!("https://img/{name}/300.png") }
        ]
    });
    if let Some(uts) = uts {
        track["date"] = json!({ "uts": uts.to_string(), "#text": "" });
    }
    track
}

pub fn now_playing(name: &str, artist: &str) -> Value {
    let mut track = raw_track(name, artist, None);
    track["@attr"] = json!({ "nowplaying": "true" });
    track
}

pub fn recent_page(tracks: Vec<Value>, page: u32, total_pages: u32) -> Value {
    json!({
        "recenttracks": {
            "track": tracks,
            "@attr": {
                "user": "alice",
                "page": page.to_string(),
                "perPage": "200",
                "totalPages": total_pages.to_string(),
                "total": "0"
            }
        }
    })
}

pub fn raw_album(name: &str, artist: &str, playcount: &str) -> Value {
    json!({
        "name": name,
        "playcount": playcount,
        "url": format!("https://www.last.fm/music/{artist}/{name}"),
        "artist": { "name": artist, "url": "", "mbid": "" },
        "image": [
            { "size": "small", "#text": "https://img/small.png" },
            { "size": "extralarge", "#text": "https://img/large.png" }
        ],
        "@attr": { "rank": "1" }
    })
}

pub fn top_albums(albums: Vec<Value>) -> Value {
    json!({ "topalbums": { "album": albums, "@attr": { "user": "alice" } } })
}
