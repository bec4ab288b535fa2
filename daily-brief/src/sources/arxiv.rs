use crate::rss_utils::text;
use crate::traits::PullFeed;
use crate::types::{ArxivTopic, FetchWindow, Item, ParsedEntry, Result, SourceKind};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
pub const ARXIV_CATEGORY: &str = "arxiv";
const ARXIV_LABEL: &str = "arXiv";
const ARXIV_TIMEOUT: Duration = Duration::from_secs(30);

/// One arXiv search topic, queried newest-submitted first.
pub struct ArxivSource {
    pub topic: ArxivTopic,
    fetcher: Arc<Fetcher>,
    base_url: String,
}

impl ArxivSource {
    pub fn new(topic: ArxivTopic, fetcher: Arc<Fetcher>) -> Self {
        Self {
            topic,
            fetcher,
            base_url: ARXIV_API_URL.to_string(),
        }
    }

    /// Point the source at a different API endpoint (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `max_results` only sizes the API page; the per-topic cap is applied separately.
    pub fn query_url(&self) -> Result<Url> {
        let max_results = self.topic.max_results.to_string();
        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("search_query", self.topic.query.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
                ("max_results", max_results.as_str()),
            ],
        )?;
        Ok(url)
    }

    pub fn source_label(&self) -> String {
        format!("{} · {}", ARXIV_LABEL, self.topic.name)
    }

    /// Normalize an Atom response from the API against `window`.
    pub fn items_from_document(&self, content: &str, window: &FetchWindow) -> Result<Vec<Item>> {
        let entries = FeedParser::new().parse_feed(content)?;
        let source = self.source_label();
        Ok(super::collect_recent(entries, window, |entry, published| {
            to_item(entry, published, &source)
        }))
    }
}

fn to_item(entry: ParsedEntry, published: String, source: &str) -> Item {
    let title = text::clean_title(&entry.title);
    let link = entry.link.unwrap_or_default();
    let id = match entry.guid {
        Some(guid) => guid,
        None if !link.is_empty() => link.clone(),
        None => title.clone(),
    };

    Item {
        id,
        title,
        link,
        source: source.to_string(),
        category: ARXIV_CATEGORY.to_string(),
        published,
        summary: text::sanitize_summary(entry.summary.as_deref().unwrap_or_default()),
        authors: Some(entry.authors.join(", ")),
    }
}

#[async_trait]
impl PullFeed for ArxivSource {
    fn source_name(&self) -> String {
        self.source_label()
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Search
    }

    async fn pull(&self, window: &FetchWindow) -> Result<Vec<Item>> {
        let url = self.query_url()?;
        info!("Querying arXiv topic: {}", self.topic.name);
        let content = self.fetcher.fetch_text_within(url.as_str(), ARXIV_TIMEOUT).await?;
        self.items_from_document(&content, window)
    }
}
