use std::{cmp::Ordering, collections::HashSet};

use chrono::{DateTime, Local, SecondsFormat, Utc};

use crate::types::Track;

/// Drops tracks without a timestamp (or a zero one) and repeated `(uts, name, artist)`
/// scrobbles, keeping the first occurrence.
pub fn dedupe_tracks(tracks: &mut Vec<Track>) {
    let mut seen = HashSet::new();
    tracks.retain(|track| match track.dedupe_key() {
        Some(key) => seen.insert(key),
        None => false,
    });
}

/// Most recent first. The sort is stable, so equal timestamps keep their
/// input order; tracks without a timestamp go last.
pub fn sort_tracks_by_recency(tracks: &mut [Track]) {
    tracks.sort_by(|a, b| match (a.uts, b.uts) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// UTC ISO-8601 with millisecond precision, e.g. `2023-11-14T22:13:20.000Z`.
pub fn iso_from_seconds(uts: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(uts, 0).map(iso)
}

pub fn iso_from_millis(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(iso)
}

pub fn iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Scrobble time in local time, e.g. `Oct 14, 2023, 9:30 PM`.
pub fn format_track_time(uts: Option<i64>) -> String {
    uts.and_then(|uts| DateTime::<Utc>::from_timestamp(uts, 0))
        .map(|t| t.with_timezone(&Local).format("%b %-d, %Y, %-I:%M %p").to_string())
        .unwrap_or_else(|| "Unknown time".to_string())
}

/// Cache update time in local time with seconds, e.g. `Oct 14, 2023, 9:30:12 PM`.
pub fn format_cache_time(iso: Option<&str>) -> String {
    iso.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| {
            t.with_timezone(&Local)
                .format("%b %-d, %Y, %-I:%M:%S %p")
                .to_string()
        })
        .unwrap_or_default()
}

/// Coarse age of a scrobble: `moments ago`, `5 min ago`, `1 hr ago`, `3 days ago`.
pub fn relative_time(uts: Option<i64>, now: DateTime<Utc>) -> String {
    let Some(uts) = uts else {
        return String::new();
    };

    let minutes = now.timestamp().saturating_sub(uts).div_euclid(60);
    if minutes < 1 {
        return "moments ago".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hr{} ago", plural(hours));
    }

    let days = hours / 24;
    format!("{days} day{} ago", plural(days))
}

/// Age of a cache file in the same coarse units, from epoch millis.
pub fn describe_age(cached_at: Option<i64>, now: DateTime<Utc>) -> String {
    match cached_at {
        Some(millis) => relative_time(Some(millis.div_euclid(1000)), now),
        None => "unknown".to_string(),
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
