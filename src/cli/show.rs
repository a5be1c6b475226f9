use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Table;

use crate::{
    cli::with_spinner,
    lastfm::LastFmApi,
    site::SiteData,
    success,
    types::{AlbumTableRow, CacheStatus, FeedView, Track, TrackTableRow},
    utils, warning,
};

pub async fn recent<C: LastFmApi>(site: &SiteData<C>, json: bool) {
    let view = with_spinner("Fetching recent tracks...", site.recent_tracks()).await;
    if json {
        return print_json(&view);
    }

    report(&view.cache, view.error.as_deref(), view.data.tracks.len(), "tracks");
    print_tracks(&view.data.tracks);
}

pub async fn history<C: LastFmApi>(site: &SiteData<C>, json: bool) {
    let view = with_spinner("Fetching listening history...", site.history()).await;
    if json {
        return print_json(&view);
    }

    report(&view.cache, view.error.as_deref(), view.data.total, "scrobbles");
    print_tracks(&view.data.tracks);
}

pub async fn albums<C: LastFmApi>(site: &SiteData<C>, json: bool) {
    let view = with_spinner("Fetching top albums...", site.top_albums()).await;
    if json {
        return print_json(&view);
    }

    report(
        &view.cache,
        view.error.as_deref(),
        view.data.albums.len(),
        &format!("albums ({})", view.data.period),
    );

    let rows: Vec<AlbumTableRow> = view
        .data
        .albums
        .iter()
        .enumerate()
        .map(|(i, a)| AlbumTableRow {
            rank: i + 1,
            artist: a.artist.clone(),
            album: a.name.clone(),
            plays: a.playcount,
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }
}

fn print_tracks(tracks: &[Track]) {
    let now = Utc::now();
    let rows: Vec<TrackTableRow> = tracks.iter().map(|t| track_row(t, now)).collect();

    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }
}

fn track_row(track: &Track, now: DateTime<Utc>) -> TrackTableRow {
    let played = if track.now_playing {
        "now playing".to_string()
    } else {
        format!(
            "{} ({})",
            utils::format_track_time(track.uts),
            utils::relative_time(track.uts, now)
        )
    };

    TrackTableRow {
        played,
        artist: track.artist.clone(),
        track: track.name.clone(),
        album: track.album.clone(),
    }
}

fn report(cache: &CacheStatus, error: Option<&str>, count: usize, noun: &str) {
    if let Some(w) = &cache.warning {
        warning!("{}", w);
    }
    if let Some(e) = error {
        warning!("{}", e);
    }

    let source = if cache.fresh { "from cache" } else { "refreshed" };
    match &cache.updated {
        Some(updated) => success!(
            "{} {} {}, updated {}",
            count,
            noun,
            source,
            utils::format_cache_time(Some(updated))
        ),
        None => warning!("No {} available", noun),
    }
}

fn print_json<P: Serialize>(view: &FeedView<P>) {
    match serde_json::to_string_pretty(view) {
        Ok(json) => println!("{json}"),
        Err(e) => warning!("Cannot serialize view: {}", e),
    }
}
