pub mod types;
pub mod rss_utils;
pub mod fetcher;
pub mod parser;
pub mod traits;
pub mod sources;
pub mod seen;
pub mod state;
pub mod config;
pub mod aggregator;
pub mod digest;
pub mod output;
pub mod pipeline;

pub use types::*;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use traits::PullFeed;
pub use sources::{ArxivSource, RssFeedSource};
pub use seen::SeenSet;
pub use state::RunState;
pub use config::BriefConfig;
pub use aggregator::{build_sections, default_sections, Section};
pub use digest::{render_digest, DigestMeta};
pub use pipeline::{DigestRun, IngestionPipeline, RunReport, RunSettings};
