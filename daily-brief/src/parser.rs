use crate::rss_utils::time;
use crate::types::{AggregatorError, ParsedEntry, Result};
use feed_rs::model::{Entry, Link, Text};
use feed_rs::parser::{self, Parser};
use tracing::debug;

/// Wraps a feed-rs parser configured for this pipeline:
/// every date field goes through [`time::parse_timestamp`], and entries
/// without an `id` keep an empty one instead of a synthesized hash, so the
/// caller's link/title fallback applies.
pub struct FeedParser {
    parser: Parser,
}

impl FeedParser {
    pub fn new() -> Self {
        let parser = parser::Builder::new()
            .timestamp_parser(time::parse_timestamp)
            .id_generator(no_generated_id)
            .build();
        Self { parser }
    }

    /// Parse a whole document. Entries are normalized lazily as the iterator is pulled.
    pub fn parse_feed(&self, content: &str) -> Result<impl Iterator<Item = ParsedEntry>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = self
            .parser
            .parse(content.as_bytes())
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        debug!("Parsed feed with {} entries", feed.entries.len());
        Ok(feed.entries.into_iter().map(parse_entry))
    }
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

fn no_generated_id(_links: &[Link], _title: &Option<Text>, _uri: Option<&str>) -> String {
    String::new()
}

fn parse_entry(entry: Entry) -> ParsedEntry {
    let guid = Some(entry.id.trim().to_string()).filter(|id| !id.is_empty());
    let link = primary_link(&entry.links);
    let title = entry.title.map(|t| t.content).unwrap_or_default();

    // Prefer the short description; fall back to the full body
    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body));

    let authors = entry
        .authors
        .into_iter()
        .map(|a| a.name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let timestamp = time::resolve([entry.published, entry.updated]);

    ParsedEntry {
        guid,
        link,
        title,
        summary,
        authors,
        timestamp,
    }
}

/// The alternate (or unlabelled) link, else whatever comes first.
fn primary_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty())
}
