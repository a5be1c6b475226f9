use std::{fmt, io::ErrorKind, path::PathBuf};

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use crate::{error::CacheError, types::CacheEntry, warning};

/// One cache file per feed; feeds never share a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKey {
    RecentTracks,
    History,
    TopAlbums,
}

impl FeedKey {
    /// Every feed, in the order they appear in CLI output.
    pub const ALL: [FeedKey; 3] = [FeedKey::RecentTracks, FeedKey::History, FeedKey::TopAlbums];

    /// File name inside the cache directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            FeedKey::RecentTracks => "lastfm.json",
            FeedKey::History => "history.json",
            FeedKey::TopAlbums => "top-albums.json",
        }
    }

    /// Human label, used in warnings and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            FeedKey::RecentTracks => "recent tracks",
            FeedKey::History => "history",
            FeedKey::TopAlbums => "top albums",
        }
    }
}

impl fmt::Display for FeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// JSON file cache, one [`CacheEntry`] per [`FeedKey`] under `dir`.
///
/// [`CacheManager::read`] and [`CacheManager::write`] never fail: cache
/// problems only cost a refetch. [`CacheManager::load`] and
/// [`CacheManager::persist`] expose the underlying errors.
pub struct CacheManager {
    dir: PathBuf,
}

impl CacheManager {
    /// Manager rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Location of the cache file for `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use lastfm_sitedata::management::{CacheManager, FeedKey};
    ///
    /// let cache = CacheManager::new(".cache");
    /// assert!(cache.path(FeedKey::History).ends_with("history.json"));
    /// ```
    pub fn path(&self, key: FeedKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Reads the entry for `key`, treating every failure as a miss.
    ///
    /// A missing file is silent; anything else is logged.
    pub async fn read<T: DeserializeOwned>(&self, key: FeedKey) -> Option<CacheEntry<T>> {
        match self.load(key).await {
            Ok(entry) => entry,
            Err(e) => {
                warning!("Unable to read Last.fm {} cache: {}", key, e);
                None
            }
        }
    }

    /// Replaces the entry for `key`. Failures are logged, never returned.
    pub async fn write<T: Serialize>(&self, key: FeedKey, entry: &CacheEntry<T>) {
        if let Err(e) = self.persist(key, entry).await {
            warning!("Unable to write Last.fm {} cache: {}", key, e);
        }
    }

    /// Reads and decodes the entry for `key`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// [`CacheError::Io`] if the file cannot be read, [`CacheError::Serde`] if
    /// it is not a valid entry.
    pub async fn load<T: DeserializeOwned>(
        &self,
        key: FeedKey,
    ) -> Result<Option<CacheEntry<T>>, CacheError> {
        let path = self.path(key);
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| CacheError::Serde { path, source })
    }

    /// Writes to a sibling temp file then renames it over the target, so an
    /// interrupted build leaves either the old or the new entry.
    pub async fn persist<T: Serialize>(
        &self,
        key: FeedKey,
        entry: &CacheEntry<T>,
    ) -> Result<(), CacheError> {
        async_fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| CacheError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path(key);
        let json = serde_json::to_string_pretty(entry).map_err(|source| CacheError::Serde {
            path: path.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, json)
            .await
            .map_err(|source| CacheError::Io {
                path: tmp.clone(),
                source,
            })?;

        async_fs::rename(&tmp, &path)
            .await
            .map_err(|source| CacheError::Io { path, source })
    }
}

/// Timestamp for a new write: `now`, unless the previous entry is stamped
/// later, in which case that stamp is kept.
///
/// # Arguments
///
/// * `previous` - `cachedAt` of the entry being replaced, if any
/// * `now` - current time in epoch millis
///
/// # Example
///
/// ```
/// use lastfm_sitedata::management::next_cached_at;
///
/// assert_eq!(next_cached_at(None, 10), 10);
/// assert_eq!(next_cached_at(Some(5), 10), 10);
/// assert_eq!(next_cached_at(Some(20), 10), 20);
/// ```
pub fn next_cached_at(previous: Option<i64>, now: i64) -> i64 {
    previous.map_or(now, |prev| prev.max(now))
}

/// Whether `entry` is younger than `ttl_minutes`. No entry, or an entry
/// without a timestamp, is never fresh.
pub fn is_fresh<T>(entry: Option<&CacheEntry<T>>, ttl_minutes: u32) -> bool {
    is_fresh_at(entry, ttl_minutes, Utc::now())
}

/// [`is_fresh`] against an explicit `now`. An age that does not fit in an
/// `i64` counts as stale.
pub fn is_fresh_at<T>(entry: Option<&CacheEntry<T>>, ttl_minutes: u32, now: DateTime<Utc>) -> bool {
    let Some(cached_at) = entry.and_then(|e| e.cached_at) else {
        return false;
    };

    let Some(age_millis) = now.timestamp_millis().checked_sub(cached_at) else {
        return false;
    };
    (age_millis as f64 / 60_000.0) < ttl_minutes as f64
}
