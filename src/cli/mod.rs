//! # CLI Module
//!
//! User-facing commands of the `lastfm-sitedata` binary. Each command is a
//! thin layer over [`crate::site::SiteData`] or the cache manager: it runs a
//! feed, reports the cache outcome on stderr and prints the result on stdout,
//! either as a table or as the JSON view a template would receive.
//!
//! ## Commands
//!
//! - [`recent`], [`history`], [`albums`] - show one feed
//! - [`export`] - write every feed's view into a site data directory
//! - [`status`] - inspect cache files without touching the network
//!
//! ## Usage Patterns
//!
//! ```bash
//! lastfm-sitedata history --pages 5          # walk five pages of scrobbles
//! lastfm-sitedata export --out src/_data     # refresh data before a site build
//! lastfm-sitedata status                     # how old is the cache?
//! ```
//!
//! Remote failures never make a command fail: they show up as warnings and
//! the cached (or empty) view is printed anyway.

mod export;
mod show;
mod status;

use std::{future::Future, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

pub use export::export;
pub use show::albums;
pub use show::history;
pub use show::recent;
pub use status::status;

async fn with_spinner<F: Future>(message: &str, task: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let output = task.await;
    pb.finish_and_clear();
    output
}
