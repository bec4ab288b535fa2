pub mod arxiv;
pub mod rss_feed;

pub use arxiv::ArxivSource;
pub use rss_feed::RssFeedSource;

use crate::rss_utils::time;
use crate::types::{FetchWindow, Item, ParsedEntry};

/// Drop entries older than the window, normalize the rest, and stop at the cap.
///
/// `to_item` receives each admitted entry together with its display timestamp.
/// Entries past the cap are never normalized.
pub(crate) fn collect_recent<I, F>(entries: I, window: &FetchWindow, mut to_item: F) -> Vec<Item>
where
    I: IntoIterator<Item = ParsedEntry>,
    F: FnMut(ParsedEntry, String) -> Item,
{
    entries
        .into_iter()
        .filter(|entry| window.admits(entry.timestamp))
        .map(|entry| {
            let published = time::format_local(entry.timestamp, &window.tz);
            to_item(entry, published)
        })
        .take(window.cap)
        .collect()
}
