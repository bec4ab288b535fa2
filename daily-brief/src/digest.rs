use crate::aggregator::Section;
use crate::rss_utils::time::DISPLAY_FORMAT;
use crate::types::Item;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const DIGEST_TITLE: &str = "Daily Brief";

/// Run facts printed in the digest header.
#[derive(Debug, Clone)]
pub struct DigestMeta {
    /// Local date label, `YYYY-MM-DD`.
    pub date: String,
    pub generated_at: DateTime<Utc>,
    pub tz: Tz,
    pub window_hours: i64,
    pub source_count: usize,
    pub show_summaries: bool,
}

/// Render the Markdown digest. Pure: no clock, no I/O.
pub fn render_digest(meta: &DigestMeta, sections: &[Section]) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {} — {}\n\n", DIGEST_TITLE, meta.date));
    out.push_str(&format!(
        "- Generated: {} ({})\n",
        meta.generated_at.with_timezone(&meta.tz).format(DISPLAY_FORMAT),
        meta.tz.name()
    ));
    out.push_str(&format!(
        "- Window: {}h · Sources: {}\n",
        meta.window_hours, meta.source_count
    ));

    for section in sections {
        out.push_str(&format!("\n## {}\n\n", section.title));
        for item in &section.items {
            out.push_str(&render_item(item, meta.show_summaries));
        }
    }

    out.push('\n');
    out.push_str("---\n");
    out.push_str("Sources and sections can be customised in the config file under `feeds`, `arxiv` and `sections`.\n");
    out
}

fn render_item(item: &Item, show_summaries: bool) -> String {
    let title = if item.title.is_empty() { "(untitled)" } else { item.title.as_str() };
    let head = if item.link.is_empty() {
        title.to_string()
    } else {
        format!("[{}]({})", title, item.link)
    };
    let mut line = format!("- {} — {} · {}\n", head, item.source, item.published);

    if show_summaries {
        if let Some(authors) = item.authors.as_deref().filter(|a| !a.is_empty()) {
            line.push_str(&format!("  > Authors: {}\n", authors));
        }
        if !item.summary.is_empty() {
            line.push_str(&format!("  > {}\n", item.summary));
        }
    }
    line
}
