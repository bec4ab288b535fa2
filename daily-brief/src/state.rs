use crate::seen::SeenSet;
use crate::types::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Everything persisted between runs. Loaded once, threaded through the pipeline, saved once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    #[serde(default)]
    pub seen: SeenSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl RunState {
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = Some(now.to_rfc3339_opts(SecondsFormat::Micros, false));
    }

    /// Read state from `path`. A missing or unreadable file yields an empty state.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No state at {}, starting empty", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Failed to read state {}: {}; starting empty", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<RunState>(&content) {
            Ok(state) => {
                info!("Loaded state with {} seen ids", state.seen.len());
                state
            }
            Err(e) => {
                warn!("Corrupt state {}: {}; starting empty", path.display(), e);
                Self::default()
            }
        }
    }

    /// Rewrite the whole state file. Goes through a sibling temp file and a rename,
    /// so an interrupted save leaves the previous state intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        info!("Saved state ({} seen ids) to {}", self.seen.len(), path.display());
        Ok(())
    }
}
