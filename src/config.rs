use crate::domain::NewDraftPolicy;
use crate::persistence::files::read_optional;
use crate::ticker::{DEFAULT_PROBE_SECS, DEFAULT_STALE_SECS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings read from config.json in the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Idle time after which the draft is committed
    pub stale_threshold_secs: u64,
    /// How often staleness is checked
    pub probe_interval_secs: u64,
    pub new_draft_policy: NewDraftPolicy,
    /// Terminals narrower than this use the narrow layout
    pub narrow_width: u16,
    /// Show a welcome entry when history is empty
    pub seed_welcome: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stale_threshold_secs: DEFAULT_STALE_SECS,
            probe_interval_secs: DEFAULT_PROBE_SECS,
            new_draft_policy: NewDraftPolicy::KeepExisting,
            narrow_width: 80,
            seed_welcome: true,
        }
    }
}

impl Config {
    /// Load config.json; a missing file gives the defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_optional(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        match content {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)
                .with_context(|| format!("Malformed config: {}", path.display())),
            _ => Ok(Self::default()),
        }
    }

    pub fn stale_threshold_ms(&self) -> i64 {
        i64::try_from(self.stale_threshold_secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }
}
