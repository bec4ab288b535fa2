pub mod defs;

pub use defs::{ArxivTopic, FeedSource, Item, SectionSpec, SourceKind};
