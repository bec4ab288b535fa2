use crate::types::{AggregatorError, ArxivTopic, FeedSource, FetchConfig, Result, SectionSpec};
use chrono::{Duration, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The YAML run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BriefConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_since_hours")]
    pub since_hours: i64,
    #[serde(default = "default_days_to_keep_seen")]
    pub days_to_keep_seen: i64,
    #[serde(default)]
    pub max_items: MaxItems,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub feeds: Vec<FeedSource>,
    #[serde(default)]
    pub arxiv: Vec<ArxivTopic>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub http: FetchConfig,
    #[serde(default)]
    pub render: RenderOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaxItems {
    #[serde(default = "default_per_feed")]
    pub per_feed: usize,
    #[serde(default = "default_per_arxiv")]
    pub per_arxiv: usize,
}

impl Default for MaxItems {
    fn default() -> Self {
        Self {
            per_feed: default_per_feed(),
            per_arxiv: default_per_arxiv(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderOptions {
    /// Print each item's summary (and arXiv authors) under its line.
    #[serde(default)]
    pub show_summaries: bool,
}

impl BriefConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: BriefConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.since_hours < 0 {
            return Err(AggregatorError::Config(format!(
                "since_hours must not be negative (got {})",
                self.since_hours
            )));
        }
        self.window()?;
        if self.days_to_keep_seen < 0 {
            return Err(AggregatorError::Config(format!(
                "days_to_keep_seen must not be negative (got {})",
                self.days_to_keep_seen
            )));
        }
        if let Some(feed) = self.feeds.iter().find(|f| f.url.trim().is_empty()) {
            return Err(AggregatorError::Config(format!("feed '{}' has no url", feed.name)));
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AggregatorError::UnknownTimezone(self.timezone.clone()))
    }

    /// The recency window, checked so that `now - window` stays a representable time.
    pub fn window(&self) -> Result<Duration> {
        Duration::try_hours(self.since_hours)
            .filter(|window| Utc::now().checked_sub_signed(*window).is_some())
            .ok_or_else(|| {
                AggregatorError::Config(format!("since_hours is out of range (got {})", self.since_hours))
            })
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_since_hours() -> i64 {
    24
}

fn default_days_to_keep_seen() -> i64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs/daily")
}

fn default_per_feed() -> usize {
    10
}

fn default_per_arxiv() -> usize {
    25
}
