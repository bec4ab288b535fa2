use crate::types::{FetchWindow, Item, Result, SourceKind};
use async_trait::async_trait;

/// Trait for pulling items from a configured source (RSS/Atom feed, search API, ...)
#[async_trait]
pub trait PullFeed: Send + Sync {
    /// Human-readable name used in logs
    fn source_name(&self) -> String;

    /// Decides which per-source cap applies and the pull order within a run
    fn kind(&self) -> SourceKind;

    /// Fetch and normalize entries inside `window`, in the order the source serves them,
    /// stopping once `window.cap` items are collected.
    async fn pull(&self, window: &FetchWindow) -> Result<Vec<Item>>;
}
