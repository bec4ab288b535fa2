use crate::aggregator::build_sections;
use crate::config::BriefConfig;
use crate::digest::{render_digest, DigestMeta};
use crate::sources::{ArxivSource, RssFeedSource};
use crate::state::RunState;
use crate::traits::PullFeed;
use crate::types::{FetchWindow, Item, Result, SectionSpec, SourceKind};
use crate::Fetcher;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{error, info};

/// Knobs a run needs besides its sources.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub tz: Tz,
    /// How far back an entry may be dated and still be admitted.
    pub window: Duration,
    pub days_to_keep_seen: i64,
    pub per_feed: usize,
    pub per_arxiv: usize,
    pub show_summaries: bool,
}

impl RunSettings {
    pub fn from_config(config: &BriefConfig) -> Result<Self> {
        Ok(Self {
            tz: config.tz()?,
            window: config.window()?,
            days_to_keep_seen: config.days_to_keep_seen,
            per_feed: config.max_items.per_feed,
            per_arxiv: config.max_items.per_arxiv,
            show_summaries: config.render.show_summaries,
        })
    }

    fn cap_for(&self, kind: SourceKind) -> usize {
        match kind {
            SourceKind::News => self.per_feed,
            SourceKind::Search => self.per_arxiv,
        }
    }
}

/// Counts for the end-of-run log line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sources_pulled: usize,
    pub sources_failed: usize,
    pub items_fetched: usize,
    pub items_new: usize,
    pub seen_pruned: usize,
}

/// What a run produced, ready for the output writers.
#[derive(Debug, Clone)]
pub struct DigestRun {
    /// Local date in the display zone; names the output file.
    pub date: String,
    pub document: String,
    pub items: Vec<Item>,
    pub report: RunReport,
}

/// Pulls every source in order, drops ids already in the seen-set, and renders the digest.
pub struct IngestionPipeline {
    sources: Vec<Box<dyn PullFeed>>,
    sections: Vec<SectionSpec>,
    settings: RunSettings,
}

impl IngestionPipeline {
    pub fn new(settings: RunSettings, sections: Vec<SectionSpec>) -> Self {
        Self {
            sources: Vec::new(),
            sections,
            settings,
        }
    }

    /// Build the pipeline with one source per configured feed and arXiv topic.
    pub fn from_config(config: &BriefConfig, fetcher: Arc<Fetcher>) -> Result<Self> {
        let mut pipeline = Self::new(RunSettings::from_config(config)?, config.sections.clone());
        for feed in &config.feeds {
            pipeline.add_source(Box::new(RssFeedSource::new(feed.clone(), fetcher.clone())));
        }
        for topic in &config.arxiv {
            pipeline.add_source(Box::new(ArxivSource::new(topic.clone(), fetcher.clone())));
        }
        Ok(pipeline)
    }

    pub fn add_source(&mut self, source: Box<dyn PullFeed>) {
        info!("Adding source to pipeline: {}", source.source_name());
        self.sources.push(source);
    }

    /// News feeds first, then search topics, each group in the order added.
    fn ordered_sources(&self) -> impl Iterator<Item = &dyn PullFeed> {
        let news = self.sources.iter().filter(|s| s.kind() == SourceKind::News);
        let search = self.sources.iter().filter(|s| s.kind() == SourceKind::Search);
        news.chain(search).map(|s| &**s)
    }

    fn news_source_count(&self) -> usize {
        self.sources.iter().filter(|s| s.kind() == SourceKind::News).count()
    }

    /// One full run. Takes the prior state and hands back the updated one; nothing is persisted here.
    ///
    /// Sources are pulled one at a time. A failing source is logged and contributes nothing.
    pub async fn run(&self, mut state: RunState, now: DateTime<Utc>) -> (RunState, DigestRun) {
        let settings = &self.settings;
        let mut report = RunReport {
            seen_pruned: state.seen.prune(settings.days_to_keep_seen, now),
            ..RunReport::default()
        };
        if report.seen_pruned > 0 {
            info!("Pruned {} expired seen ids", report.seen_pruned);
        }

        let since = now
            .checked_sub_signed(settings.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut collected: Vec<Item> = Vec::new();

        for source in self.ordered_sources() {
            let window = FetchWindow::new(since, settings.cap_for(source.kind()), settings.tz);
            report.sources_pulled += 1;

            let items = match source.pull(&window).await {
                Ok(items) => items,
                Err(e) => {
                    error!("[{}:error] {} -> {}", source.kind().as_str(), source.source_name(), e);
                    report.sources_failed += 1;
                    continue;
                }
            };

            report.items_fetched += items.len();
            let before = collected.len();
            for item in items {
                if state.seen.contains(&item.id) {
                    continue;
                }
                state.seen.mark(&item.id, now);
                collected.push(item);
            }
            info!("{}: {} new items", source.source_name(), collected.len() - before);
        }
        report.items_new = collected.len();

        let sections = build_sections(&collected, &self.sections);
        let date = now.with_timezone(&settings.tz).format("%Y-%m-%d").to_string();
        let meta = DigestMeta {
            date: date.clone(),
            generated_at: now,
            tz: settings.tz,
            window_hours: settings.window.num_hours(),
            source_count: self.news_source_count(),
            show_summaries: settings.show_summaries,
        };
        let document = render_digest(&meta, &sections);
        state.touch(now);

        info!(
            "Run complete: {} sources ({} failed), {} fetched, {} new",
            report.sources_pulled, report.sources_failed, report.items_fetched, report.items_new
        );

        (
            state,
            DigestRun {
                date,
                document,
                items: collected,
                report,
            },
        )
    }
}
