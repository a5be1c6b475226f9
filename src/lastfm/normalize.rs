//! Mapping from raw API JSON to [`Track`] and [`Album`].
//!
//! Every function here is total: a malformed field yields its default rather
//! than an error, so one odd record never costs a whole feed.

use serde_json::Value;

use crate::{
    types::{Album, Track},
    utils,
};

/// Records under `response[root][key]`.
///
/// Last.fm collapses a one-element list into a bare object; that is accepted
/// as a single record. Any other shape yields no records.
pub fn list_items(response: &Value, root: &str, key: &str) -> Vec<Value> {
    match response.get(root).and_then(|r| r.get(key)) {
        Some(Value::Array(items)) => items.clone(),
        Some(item @ Value::Object(_)) => vec![item.clone()],
        _ => Vec::new(),
    }
}

/// `response[root]["@attr"].totalPages`, when it is a positive number.
pub fn total_pages(response: &Value, root: &str) -> Option<u32> {
    response
        .get(root)
        .and_then(|r| r.get("@attr"))
        .and_then(|attr| attr.get("totalPages"))
        .and_then(as_u64)
        .filter(|n| *n > 0)
        .map(|n| n.min(u32::MAX as u64) as u32)
}

pub fn normalize_track(raw: &Value) -> Track {
    let uts = raw.get("date").and_then(|d| d.get("uts")).and_then(as_i64);

    Track {
        name: string_field(raw, "name"),
        artist: raw.get("artist").map(text_of).unwrap_or_default(),
        album: raw.get("album").map(text_of).unwrap_or_default(),
        url: string_field(raw, "url"),
        image: pick_image(raw.get("image")),
        now_playing: raw
            .get("@attr")
            .and_then(|a| a.get("nowplaying"))
            .and_then(Value::as_str)
            == Some("true"),
        uts,
        played_at: uts.and_then(utils::iso_from_seconds),
    }
}

pub fn normalize_album(raw: &Value) -> Album {
    Album {
        name: string_field(raw, "name"),
        artist: raw.get("artist").map(text_of).unwrap_or_default(),
        playcount: raw.get("playcount").and_then(as_u64).unwrap_or(0),
        url: string_field(raw, "url"),
        image: pick_image(raw.get("image")),
    }
}

/// Largest usable image: the last entry, in API order, with a non-empty URL.
pub fn pick_image(images: Option<&Value>) -> Option<String> {
    let Some(Value::Array(images)) = images else {
        return None;
    };

    images
        .iter()
        .rev()
        .filter_map(|img| img.get("#text").and_then(Value::as_str))
        .find(|url| !url.is_empty())
        .map(str::to_string)
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Text of an artist/album reference: `{"#text": ..}`, `{"name": ..}` or a bare string.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("#text")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| map.get("name").and_then(Value::as_str))
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
