use chrono::{TimeZone, Utc};
use lastfm_sitedata::types::Track;
use lastfm_sitedata::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, artist: &str, uts: Option<i64>) -> Track {
    Track {
        name: name.to_string(),
        artist: artist.to_string(),
        album: "Album".to_string(),
        url: String::new(),
        image: None,
        now_playing: uts.is_none(),
        uts,
        played_at: uts.and_then(iso_from_seconds),
    }
}

#[test]
fn test_dedupe_tracks() {
    let mut tracks = vec![
        create_test_track("Song", "Artist A", Some(100)),
        create_test_track("Song", "Artist A", Some(100)), // Duplicate
        create_test_track("Song", "Artist A", Some(200)), // Played again later
        create_test_track("Song", "Artist B", Some(100)), // Same time, other artist
        create_test_track("Playing", "Artist A", None),
        create_test_track("Epoch", "Artist A", Some(0)),
    ];

    dedupe_tracks(&mut tracks);

    let keys: Vec<(Option<i64>, &str)> = tracks
        .iter()
        .map(|t| (t.uts, t.artist.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Some(100), "Artist A"),
            (Some(200), "Artist A"),
            (Some(100), "Artist B"),
        ]
    );
}

#[test]
fn test_sort_tracks_by_recency() {
    let mut tracks = vec![
        create_test_track("Old", "A", Some(100)),
        create_test_track("New", "A", Some(200)),
    ];

    sort_tracks_by_recency(&mut tracks);

    assert_eq!(tracks[0].uts, Some(200));
    assert_eq!(tracks[1].uts, Some(100));
}

#[test]
fn test_sort_is_stable_and_non_increasing() {
    let stamps = [5, 3, 9, 3, 1, 9, 7, 3];
    let mut tracks: Vec<Track> = stamps
        .iter()
        .enumerate()
        .map(|(i, uts)| create_test_track(&format!("t{i}"), "A", Some(*uts)))
        .collect();

    sort_tracks_by_recency(&mut tracks);

    assert!(tracks.windows(2).all(|w| w[0].uts >= w[1].uts));
    // Equal timestamps keep their input order
    let threes: Vec<&str> = tracks
        .iter()
        .filter(|t| t.uts == Some(3))
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(threes, vec!["t1", "t3", "t7"]);
}

#[test]
fn test_sort_puts_untimed_tracks_last() {
    let mut tracks = vec![
        create_test_track("Playing", "A", None),
        create_test_track("Done", "A", Some(1)),
    ];

    sort_tracks_by_recency(&mut tracks);

    assert_eq!(tracks[0].name, "Done");
    assert_eq!(tracks[1].name, "Playing");
}

#[test]
fn test_iso_rendering() {
    assert_eq!(
        iso_from_seconds(1_700_000_000).as_deref(),
        Some("2023-11-14T22:13:20.000Z")
    );
    assert_eq!(
        iso_from_millis(1_700_000_000_123).as_deref(),
        Some("2023-11-14T22:13:20.123Z")
    );
}

#[test]
fn test_relative_time() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let ago = |seconds: i64| Some(now.timestamp() - seconds);

    assert_eq!(relative_time(None, now), "");
    assert_eq!(relative_time(ago(30), now), "moments ago");
    assert_eq!(relative_time(ago(60), now), "1 min ago");
    assert_eq!(relative_time(ago(59 * 60), now), "59 min ago");
    assert_eq!(relative_time(ago(60 * 60), now), "1 hr ago");
    assert_eq!(relative_time(ago(5 * 60 * 60), now), "5 hrs ago");
    assert_eq!(relative_time(ago(24 * 60 * 60), now), "1 day ago");
    assert_eq!(relative_time(ago(3 * 24 * 60 * 60), now), "3 days ago");
}

#[test]
fn test_relative_time_with_extreme_timestamps() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    assert_eq!(relative_time(Some(i64::MAX), now), "moments ago");
    assert!(relative_time(Some(i64::MIN), now).ends_with("days ago"));
}

#[test]
fn test_describe_age() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let ten_minutes_ago = now.timestamp_millis() - 10 * 60 * 1000;

    assert_eq!(describe_age(Some(ten_minutes_ago), now), "10 min ago");
    assert_eq!(describe_age(None, now), "unknown");
}

#[test]
fn test_format_track_time() {
    assert_eq!(format_track_time(None), "Unknown time");

    let formatted = format_track_time(Some(1_700_000_000));
    assert!(formatted.contains("2023"));
    assert!(formatted.ends_with("AM") || formatted.ends_with("PM"));
}

#[test]
fn test_format_cache_time() {
    assert_eq!(format_cache_time(None), "");
    assert_eq!(format_cache_time(Some("not a date")), "");

    let formatted = format_cache_time(Some("2024-05-01T12:00:00.000Z"));
    assert!(formatted.contains("2024"));
}
