use crate::types::{Item, SectionSpec};
use std::collections::HashMap;
use tracing::debug;

/// A rendered-ready section: its title and items, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub items: Vec<Item>,
}

/// Grouping used when the config declares no sections.
pub fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new("Official / Vendors", &["vendor-cn", "vendor-global", "vendor"]),
        SectionSpec::new("Chinese-language News", &["zh-media"]),
        SectionSpec::new("English-language News", &["en-news", "en-depth", "newsletter"]),
        SectionSpec::new("Research Labs / Open Source", &["research-lab", "open-source"]),
        SectionSpec::new("Papers · arXiv", &["arxiv"]),
    ]
}

/// Bucket items by category and lay the buckets out in `plan` order.
///
/// Within a category, items are stably sorted by `published` descending; undated
/// items sink to the end. Sections that collect nothing are left out. A category
/// named by two sections shows up in both.
pub fn build_sections(items: &[Item], plan: &[SectionSpec]) -> Vec<Section> {
    let fallback;
    let plan = if plan.is_empty() {
        fallback = default_sections();
        &fallback[..]
    } else {
        plan
    };

    let mut by_category: HashMap<&str, Vec<&Item>> = HashMap::new();
    for item in items {
        by_category.entry(item.category.as_str()).or_default().push(item);
    }
    for bucket in by_category.values_mut() {
        bucket.sort_by(|a, b| b.published.cmp(&a.published));
    }

    let sections: Vec<Section> = plan
        .iter()
        .filter_map(|spec| {
            let items: Vec<Item> = spec
                .includes
                .iter()
                .filter_map(|category| by_category.get(category.as_str()))
                .flatten()
                .map(|item| (*item).clone())
                .collect();
            if items.is_empty() {
                return None;
            }
            Some(Section {
                title: spec.display_title().to_string(),
                items,
            })
        })
        .collect();

    debug!(
        "Built {} sections from {} items across {} categories",
        sections.len(),
        items.len(),
        by_category.len()
    );
    sections
}
