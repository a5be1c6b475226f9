use std::{io, path::PathBuf};

use thiserror::Error;

/// Required settings are absent.
///
/// Terminal for the current build: a feed reporting this never touches the
/// network or the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing Last.fm configuration: {}. Check your .env file.", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// A call to the Last.fm API did not produce a usable response.
///
/// This is the only error kind that reaches the orchestrator's decision logic;
/// every variant is recoverable through the cache fallback.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The server answered outside the 2xx range.
    #[error("Last.fm request failed: {status} {status_text}{}", detail(.message))]
    Status {
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    /// A 2xx response carrying Last.fm's `{"error": n, "message": ...}` envelope.
    #[error("Last.fm API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Connection, TLS or timeout failure.
    #[error("Last.fm request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not JSON.
    #[error("Last.fm returned an unreadable response: {0}")]
    Decode(String),
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(" ({m})"),
        _ => String::new(),
    }
}

impl RemoteError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::Status { status, .. } => matches!(status, 502..=504),
            RemoteError::Transport(e) => e.is_timeout() || e.is_connect(),
            RemoteError::Api { .. } | RemoteError::Decode(_) => false,
        }
    }
}

/// Failure reading or writing a cache file. Always absorbed and logged.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode {}: {source}", path.display())]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
