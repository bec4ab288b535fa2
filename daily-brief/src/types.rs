use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
// Shared descriptors live in the interfaces crate
pub use interfaces::defs::{ArxivTopic, FeedSource, Item, SectionSpec, SourceKind};

/// HTTP settings shared by every source in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "daily-brief/1.0 (+https://github.com/)".to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

/// Bounds applied to a single source pull.
#[derive(Debug, Clone)]
pub struct FetchWindow {
    /// Entries with a resolved timestamp strictly before this are dropped.
    pub since: DateTime<Utc>,
    /// Maximum items one source may contribute.
    pub cap: usize,
    /// Zone used for the `published` display string.
    pub tz: Tz,
}

impl FetchWindow {
    pub fn new(since: DateTime<Utc>, cap: usize, tz: Tz) -> Self {
        Self { since, cap, tz }
    }

    /// Undated entries are never provably old, so they are admitted.
    pub fn admits(&self, timestamp: Option<DateTime<Utc>>) -> bool {
        match timestamp {
            Some(ts) => ts >= self.since,
            None => true,
        }
    }
}

/// A feed entry after parsing, before it becomes an [`Item`].
#[derive(Debug, Clone, Default)]
pub struct ParsedEntry {
    pub guid: Option<String>,
    pub link: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    pub authors: Vec<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
