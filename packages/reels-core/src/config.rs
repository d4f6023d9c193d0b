//! Coordinator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ReelsError, ReelsResult};

/// What the registry does when an id is registered again without an
/// intervening unregister while the first handle is still alive.
///
/// Handles that were dropped without being unregistered are always replaced,
/// whichever policy is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the existing handle and log the double mount.
    #[default]
    Reject,
    /// Swap in the new handle.
    Replace,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = ReelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "replace" => Ok(Self::Replace),
            other => Err(ReelsError::Configuration(format!(
                "unknown duplicate registration policy: {other}"
            ))),
        }
    }
}

/// Configuration for a [`PlaybackCoordinator`](crate::coordinator::PlaybackCoordinator).
///
/// All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Initial value of the feed-wide mute flag.
    pub start_muted: bool,

    /// Handling of double registration for the same id.
    pub duplicate_registration: DuplicatePolicy,

    /// Capacity of the event broadcast channel.
    pub event_channel_capacity: usize,
}

impl CoordinatorConfig {
    /// Validates the configuration values.
    pub fn validate(&self) -> ReelsResult<()> {
        if self.event_channel_capacity == 0 {
            return Err(ReelsError::Configuration(
                "event_channel_capacity must be >= 1 (broadcast::channel panics on 0)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            start_muted: false,
            duplicate_registration: DuplicatePolicy::Reject,
            event_channel_capacity: 100,
        }
    }
}
