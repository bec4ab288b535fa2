use serde::{Deserialize, Serialize};

/// One normalized entry, ready to be sectioned and rendered.
///
/// Items are built once by a source and afterwards only filtered or reordered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub link: String,
    pub source: String,
    pub category: String,
    /// `YYYY-MM-DD HH:MM` in the display zone, empty when the entry carried no usable time.
    pub published: String,
    pub summary: String,
    /// Only set by search-API sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
}

/// Which family of source produced an item. News feeds are pulled before search results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    News,
    Search,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::News => "feed",
            SourceKind::Search => "search",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArxivTopic {
    pub name: String,
    pub query: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// A display section: a title and the categories it collects, in order.
///
/// Older configs name sections with `key` instead of `title`; either is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub includes: Vec<String>,
}

impl SectionSpec {
    pub fn new(title: &str, includes: &[&str]) -> Self {
        Self {
            title: Some(title.to_owned()),
            key: None,
            includes: includes.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.key.as_deref())
            .unwrap_or_default()
    }
}

fn default_category() -> String {
    "misc".to_owned()
}

fn default_max_results() -> u32 {
    25
}

// Object style note:
// These are plain descriptors. A run builds its sources from them, pulls once,
// and throws the resulting items away after rendering. Nothing here holds
// state between runs; that lives in the persisted seen-set.
