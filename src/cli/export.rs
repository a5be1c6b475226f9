use std::path::Path;

use serde::Serialize;

use crate::{Res, cli::with_spinner, lastfm::LastFmApi, site::SiteData, success, warning};

pub const RECENT_TRACKS_FILE: &str = "lastfm.json";
pub const HISTORY_FILE: &str = "history.json";
pub const TOP_ALBUMS_FILE: &str = "topAlbums.json";

/// Writes every feed's view into `out`, one JSON file per feed.
///
/// Feed failures are reported but do not fail the export; only an unwritable
/// output directory does.
pub async fn export<C: LastFmApi>(site: &SiteData<C>, out: &Path) -> Res<()> {
    let snapshot = with_spinner("Fetching Last.fm feeds...", site.snapshot()).await;

    for (name, error) in [
        ("recent tracks", &snapshot.recent_tracks.error),
        ("history", &snapshot.history.error),
        ("top albums", &snapshot.top_albums.error),
    ] {
        if let Some(e) = error {
            warning!("{}: {}", name, e);
        }
    }

    async_fs::create_dir_all(out).await?;
    write_json(&out.join(RECENT_TRACKS_FILE), &snapshot.recent_tracks).await?;
    write_json(&out.join(HISTORY_FILE), &snapshot.history).await?;
    write_json(&out.join(TOP_ALBUMS_FILE), &snapshot.top_albums).await?;

    success!(
        "Exported {} recent tracks, {} scrobbles and {} albums to {}",
        snapshot.recent_tracks.data.tracks.len(),
        snapshot.history.data.total,
        snapshot.top_albums.data.albums.len(),
        out.display()
    );
    Ok(())
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Res<()> {
    let json = serde_json::to_string_pretty(value)?;
    async_fs::write(path, json).await?;
    Ok(())
}
