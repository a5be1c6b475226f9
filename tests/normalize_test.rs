use lastfm_sitedata::lastfm::normalize::*;
use serde_json::{Value, json};

#[test]
fn test_pick_image_prefers_largest_non_empty() {
    let images = json!([
        { "size": "small", "#text": "https://img/34.png" },
        { "size": "medium", "#text": "https://img/64.png" },
        { "size": "large", "#text": "" },
        { "size": "extralarge", "#text": "" }
    ]);
    assert_eq!(
        pick_image(Some(&images)),
        Some("https://img/64.png".to_string())
    );
}

#[test]
fn test_pick_image_ignores_null_and_odd_entries() {
    let with_leading_nulls = json!([
        { "size": "small", "#text": null },
        null,
        { "size": "medium" },
        { "size": "large", "#text": "https://img/174.png" }
    ]);
    assert_eq!(
        pick_image(Some(&with_leading_nulls)),
        Some("https://img/174.png".to_string())
    );

    let all_empty = json!([{ "#text": "" }, { "#text": 12 }]);
    assert_eq!(pick_image(Some(&all_empty)), None);
    assert_eq!(pick_image(Some(&json!("https://img/x.png"))), None);
    assert_eq!(pick_image(Some(&json!({ "#text": "https://img/x.png" }))), None);
    assert_eq!(pick_image(None), None);
}

#[test]
fn test_normalize_scrobbled_track() {
    let raw = json!({
        "name": "Windowlicker",
        "artist": { "#text": "Aphex Twin", "mbid": "" },
        "album": { "#text": "Windowlicker", "mbid": "" },
        "url": "https://www.last.fm/music/Aphex+Twin/_/Windowlicker",
        "image": [
            { "size": "small", "#text": "https://img/34.png" },
            { "size": "extralarge", "#text": "https://img/300.png" }
        ],
        "date": { "uts": "1700000000", "#text": "14 Nov 2023, 22:13" }
    });

    let track = normalize_track(&raw);
    assert_eq!(track.name, "Windowlicker");
    assert_eq!(track.artist, "Aphex Twin");
    assert_eq!(track.album, "Windowlicker");
    assert_eq!(track.url, "https://www.last.fm/music/Aphex+Twin/_/Windowlicker");
    assert_eq!(track.image.as_deref(), Some("https://img/300.png"));
    assert!(!track.now_playing);
    assert_eq!(track.uts, Some(1_700_000_000));
    assert_eq!(track.played_at.as_deref(), Some("2023-11-14T22:13:20.000Z"));
}

#[test]
fn test_normalize_now_playing_track() {
    let raw = json!({
        "name": "Live",
        "artist": { "#text": "Band" },
        "@attr": { "nowplaying": "true" }
    });

    let track = normalize_track(&raw);
    assert!(track.now_playing);
    assert_eq!(track.uts, None);
    assert_eq!(track.played_at, None);
    assert_eq!(track.album, "");
    assert_eq!(track.image, None);
}

#[test]
fn test_now_playing_requires_string_flag() {
    let boolean_flag = json!({ "name": "X", "@attr": { "nowplaying": true } });
    assert!(!normalize_track(&boolean_flag).now_playing);

    let false_flag = json!({ "name": "X", "@attr": { "nowplaying": "false" } });
    assert!(!normalize_track(&false_flag).now_playing);
}

#[test]
fn test_normalize_tolerates_garbage() {
    for raw in [json!(null), json!(42), json!("track"), json!([]), json!({})] {
        let track = normalize_track(&raw);
        assert_eq!(track.name, "");
        assert_eq!(track.uts, None);
        assert!(!track.now_playing);

        let album = normalize_album(&raw);
        assert_eq!(album.playcount, 0);
        assert_eq!(album.image, None);
    }

    let bad_date = json!({ "name": "X", "date": { "uts": "yesterday" } });
    assert_eq!(normalize_track(&bad_date).uts, None);

    let numeric_date = json!({ "name": "X", "date": { "uts": 1_700_000_000 } });
    assert_eq!(normalize_track(&numeric_date).uts, Some(1_700_000_000));
}

#[test]
fn test_artist_shapes() {
    let extended = json!({ "artist": { "name": "Extended", "url": "" } });
    assert_eq!(normalize_track(&extended).artist, "Extended");

    let bare = json!({ "artist": "Bare" });
    assert_eq!(normalize_track(&bare).artist, "Bare");
}

#[test]
fn test_normalize_album_playcount() {
    let album = |playcount: Value| {
        normalize_album(&json!({
            "name": "Album",
            "artist": { "name": "Artist" },
            "playcount": playcount
        }))
    };

    assert_eq!(album(json!("42")).playcount, 42);
    assert_eq!(album(json!(17)).playcount, 17);
    assert_eq!(album(json!("many")).playcount, 0);
    assert_eq!(album(json!(-3)).playcount, 0);
    assert_eq!(album(json!(null)).playcount, 0);
    assert_eq!(album(json!("42")).artist, "Artist");
}

#[test]
fn test_list_items_shapes() {
    let list = json!({ "recenttracks": { "track": [{ "name": "A" }, { "name": "B" }] } });
    assert_eq!(list_items(&list, "recenttracks", "track").len(), 2);

    let single = json!({ "recenttracks": { "track": { "name": "A" } } });
    assert_eq!(list_items(&single, "recenttracks", "track").len(), 1);

    let wrong = json!({ "recenttracks": { "track": "A" } });
    assert!(list_items(&wrong, "recenttracks", "track").is_empty());

    assert!(list_items(&json!({}), "topalbums", "album").is_empty());
    assert!(list_items(&json!(null), "topalbums", "album").is_empty());
}

#[test]
fn test_total_pages() {
    let response = |pages: Value| json!({ "recenttracks": { "@attr": { "totalPages": pages } } });

    assert_eq!(total_pages(&response(json!("12")), "recenttracks"), Some(12));
    assert_eq!(total_pages(&response(json!(3)), "recenttracks"), Some(3));
    assert_eq!(total_pages(&response(json!("0")), "recenttracks"), None);
    assert_eq!(total_pages(&response(json!("lots")), "recenttracks"), None);
    assert_eq!(total_pages(&json!({ "recenttracks": {} }), "recenttracks"), None);
}
