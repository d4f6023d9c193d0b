//! Scripted feed event traces.

use std::path::Path;

use anyhow::{Context, Result};
use reels_core::{FeedItemId, HandleStatus};
use serde::Deserialize;

/// One scripted UI or player callback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Mount an item with a fresh simulated player.
    Mounted {
        id: FeedItemId,
        #[serde(default = "initial_status")]
        status: HandleStatus,
        /// Make the simulated player fail every `play()`.
        #[serde(default)]
        fail_play: bool,
    },
    /// Unmount an item.
    Unmounted { id: FeedItemId },
    /// The item's player reports a new status.
    Status { id: FeedItemId, status: HandleStatus },
    /// Viewability callback; omit `id` for "nothing visible".
    Visible {
        #[serde(default)]
        id: Option<FeedItemId>,
    },
    /// Screen focus callback.
    Focus { focused: bool },
    /// Mute button pressed.
    ToggleMute,
    /// Mute flag set explicitly.
    SetMute { muted: bool },
    /// The UI destroys the player without unmounting the item.
    DropHandle { id: FeedItemId },
}

fn initial_status() -> HandleStatus {
    HandleStatus::Loading
}

/// A named list of steps.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Reads and parses a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse scenario: {}", path.display()))
    }

    /// Parses a scenario from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}
