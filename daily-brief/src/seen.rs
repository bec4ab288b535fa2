use crate::rss_utils::time::parse_timestamp;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Cross-run ledger of emitted item ids and when each was first seen (RFC 3339, UTC).
///
/// Entries are never rewritten once present; they leave only through [`SeenSet::prune`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet {
    entries: BTreeMap<String, String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Record `id` as first seen at `now`. Returns false if it was already present.
    pub fn mark(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.entries
            .insert(id.to_string(), now.to_rfc3339_opts(SecondsFormat::Micros, false));
        true
    }

    /// Drop entries older than `retention_days` whole days, and any whose stored time does not parse.
    /// Returns how many were removed.
    pub fn prune(&mut self, retention_days: i64, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, stored| match parse_timestamp(stored) {
            Some(first_seen) => (now - first_seen).num_days() <= retention_days,
            None => {
                debug!("Expiring seen entry with unreadable timestamp: {}", id);
                false
            }
        });
        before - self.entries.len()
    }

    /// First-seen timestamp as stored.
    pub fn first_seen(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
