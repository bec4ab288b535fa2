use crate::rss_utils::text;
use crate::traits::PullFeed;
use crate::types::{FeedSource, FetchWindow, Item, ParsedEntry, Result, SourceKind};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// A configured RSS/Atom feed
pub struct RssFeedSource {
    pub spec: FeedSource,
    fetcher: Arc<Fetcher>,
}

impl RssFeedSource {
    pub fn new(spec: FeedSource, fetcher: Arc<Fetcher>) -> Self {
        Self { spec, fetcher }
    }

    /// Normalize an already-fetched feed document against `window`.
    pub fn items_from_document(&self, content: &str, window: &FetchWindow) -> Result<Vec<Item>> {
        let entries = FeedParser::new().parse_feed(content)?;
        Ok(super::collect_recent(entries, window, |entry, published| {
            self.to_item(entry, published)
        }))
    }

    fn to_item(&self, entry: ParsedEntry, published: String) -> Item {
        let id = entry_identity(&entry, &self.spec.name);
        Item {
            id,
            title: text::clean_title(&entry.title),
            link: entry.link.unwrap_or_default(),
            source: self.spec.name.clone(),
            category: self.spec.category.clone(),
            published,
            summary: text::sanitize_summary(entry.summary.as_deref().unwrap_or_default()),
            authors: None,
        }
    }
}

/// Feed id, else link, else `name:title`.
pub fn entry_identity(entry: &ParsedEntry, source_name: &str) -> String {
    entry
        .guid
        .clone()
        .or_else(|| entry.link.clone())
        .unwrap_or_else(|| format!("{}:{}", source_name, entry.title))
}

#[async_trait]
impl PullFeed for RssFeedSource {
    fn source_name(&self) -> String {
        self.spec.name.clone()
    }

    fn kind(&self) -> SourceKind {
        SourceKind::News
    }

    async fn pull(&self, window: &FetchWindow) -> Result<Vec<Item>> {
        info!("Pulling RSS feed: {} ({})", self.spec.name, self.spec.url);
        let content = self.fetcher.fetch_text(&self.spec.url).await?;
        self.items_from_document(&content, window)
    }
}
