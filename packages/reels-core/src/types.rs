//! Identifier and status types shared by every layer of the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one entry in the feed.
///
/// Unique only within the currently mounted window of the feed. The same id
/// may come back after a feed reload, so it must never be used as a
/// long-lived key outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedItemId(String);

impl FeedItemId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeedItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FeedItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&FeedItemId> for FeedItemId {
    fn from(id: &FeedItemId) -> Self {
        id.clone()
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FeedItemId {
                fn from(id: $ty) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

impl_from_int!(u32, u64, i64);

/// Readiness reported by a playable handle.
///
/// Only `ReadyToPlay` allows the coordinator to start playback. `Error` is a
/// dead end: the engine never retries a failed handle on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleStatus {
    /// Created but nothing loaded yet.
    #[default]
    Idle,
    /// Buffering or initializing the decoder.
    Loading,
    /// Buffered enough to start immediately.
    ReadyToPlay,
    /// The backend gave up on this item.
    Error,
}

impl HandleStatus {
    /// Returns true if playback can start right now.
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Self::ReadyToPlay)
    }
}
