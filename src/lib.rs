//! Last.fm build-time data provider.
//!
//! This library fetches a user's recent tracks, listening history and top
//! albums from the Last.fm web API, normalizes them and caches each feed as a
//! JSON file so a static-site generator can render pages without hitting the
//! network on every build.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types for configuration, remote and cache failures
//! - `feeds` - The cache-and-fetch pipeline and the three feed definitions
//! - `lastfm` - Last.fm API client and response normalization
//! - `management` - On-disk cache management
//! - `site` - Site-data accessors consumed by templates
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use lastfm_sitedata::{config, site::SiteData};
//!
//! #[tokio::main]
//! async fn main() -> lastfm_sitedata::Res<()> {
//!     config::load_env();
//!     let site = SiteData::from_config(config::Config::from_env())?;
//!     let history = site.history().await;
//!     println!("{}", serde_json::to_string_pretty(&history)?);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod feeds;
pub mod lastfm;
pub mod management;
pub mod site;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the binary edge where any error is reported and turned into an
/// exit status. Library operations return the typed errors from [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Output goes to stderr so that stdout stays usable for JSON view-models.
///
/// # Example
///
/// ```
/// info!("Refreshing {} from Last.fm", "history");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Wrote {} feeds", 3);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary uses this. Library code never terminates the process, since
/// a failing feed must not abort a site build.
///
/// # Example
///
/// ```
/// error!("Cannot write {}", path.display());
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: unreadable cache files, failed cache writes
/// and fetch failures that fall back to cached data.
///
/// # Example
///
/// ```
/// warning!("Unable to read cache {}: {}", path.display(), e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
