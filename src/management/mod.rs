mod cache;

pub use cache::CacheManager;
pub use cache::FeedKey;
pub use cache::is_fresh;
pub use cache::is_fresh_at;
pub use cache::next_cached_at;
