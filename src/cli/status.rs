use chrono::Utc;
use serde_json::Value;
use tabled::Table;

use crate::{
    config::Config,
    info,
    management::{CacheManager, FeedKey, is_fresh},
    types::{CacheEntry, CacheTableRow},
    utils, warning,
};

/// Prints the state of each feed's cache file. No network access.
pub async fn status(config: &Config) {
    match config.credentials() {
        Ok(c) => info!("Configured for Last.fm user {}", c.username),
        Err(e) => warning!("{}", e),
    }

    let cache = CacheManager::new(config.cache_dir.clone());
    let now = Utc::now();
    let mut rows = Vec::new();

    for key in FeedKey::ALL {
        let path = cache.path(key);
        let row = match cache.load::<Value>(key).await {
            Ok(Some(entry)) => CacheTableRow {
                feed: key.to_string(),
                file: path.display().to_string(),
                age: utils::describe_age(entry.cached_at, now),
                fresh: yes_no(is_fresh(Some(&entry), config.ttl_minutes)),
                records: record_count(&entry).to_string(),
            },
            Ok(None) => CacheTableRow {
                feed: key.to_string(),
                file: path.display().to_string(),
                age: "missing".to_string(),
                fresh: yes_no(false),
                records: "-".to_string(),
            },
            Err(e) => {
                warning!("{}", e);
                CacheTableRow {
                    feed: key.to_string(),
                    file: path.display().to_string(),
                    age: "unreadable".to_string(),
                    fresh: yes_no(false),
                    records: "-".to_string(),
                }
            }
        };
        rows.push(row);
    }

    info!("Cache TTL is {} minutes", config.ttl_minutes);
    println!("{}", Table::new(rows));
}

fn record_count(entry: &CacheEntry<Value>) -> usize {
    ["tracks", "albums"]
        .iter()
        .filter_map(|key| entry.data.get(key).and_then(Value::as_array))
        .map(Vec::len)
        .sum()
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}
