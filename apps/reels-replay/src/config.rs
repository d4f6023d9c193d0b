//! Replay configuration.
//!
//! Supports loading from YAML files with environment variable overrides.

use std::path::Path;

use anyhow::{Context, Result};
use reels_core::{CoordinatorConfig, DuplicatePolicy};
use serde::Deserialize;

/// Replay configuration loaded from YAML with environment overrides.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Initial feed-wide mute flag.
    /// Override: `REELS_START_MUTED`
    pub start_muted: bool,

    /// Handling of a second registration for a mounted id.
    /// Override: `REELS_DUPLICATE_REGISTRATION` (`reject` or `replace`)
    pub duplicate_registration: DuplicatePolicy,

    /// Event channel capacity. Events are drained after the run, so this
    /// bounds how many are kept.
    /// Override: `REELS_EVENT_CHANNEL_CAPACITY`
    pub event_channel_capacity: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            start_muted: false,
            duplicate_registration: DuplicatePolicy::Reject,
            event_channel_capacity: 1024,
        }
    }
}

impl ReplayConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies overrides from a variable lookup. Unparseable values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("REELS_START_MUTED") {
            if let Ok(muted) = val.parse() {
                self.start_muted = muted;
            }
        }

        if let Some(val) = lookup("REELS_DUPLICATE_REGISTRATION") {
            match val.parse() {
                Ok(policy) => self.duplicate_registration = policy,
                Err(e) => log::warn!("Ignoring REELS_DUPLICATE_REGISTRATION: {}", e),
            }
        }

        if let Some(val) = lookup("REELS_EVENT_CHANNEL_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                self.event_channel_capacity = capacity;
            }
        }
    }

    /// Converts to reels-core's config type.
    pub fn to_core_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            start_muted: self.start_muted,
            duplicate_registration: self.duplicate_registration,
            event_channel_capacity: self.event_channel_capacity,
        }
    }
}
