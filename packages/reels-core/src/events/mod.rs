//! Event system for observing coordinator decisions.
//!
//! This module provides:
//! - [`EventEmitter`] trait the coordinator and feed session emit through
//! - [`BroadcastEventBridge`] fanning events out over a broadcast channel
//! - Event types for playback decisions and item lifecycle
//!
//! Events are informational. The UI layer uses them to show a fallback for
//! items that can never play, and tests use them to assert call ordering.

mod bridge;
mod emitter;

pub use bridge::BroadcastEventBridge;
pub use emitter::{EventEmitter, LoggingEventEmitter, NoopEventEmitter};

use serde::Serialize;

use crate::coordinator::DropReason;
use crate::item_state::ItemPlaybackState;
use crate::types::{FeedItemId, HandleStatus};

/// Events broadcast to listeners.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum BroadcastEvent {
    /// Decisions taken by the playback coordinator.
    Playback(PlaybackEvent),

    /// Registration and per-item state changes.
    Item(ItemEvent),
}

/// Playback commands issued (or refused) by the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// `play()` was invoked on a handle.
    Played {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        /// True if the play changed the active id.
        #[serde(rename = "becameActive")]
        became_active: bool,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// `pause()` was invoked on a handle.
    Paused {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// A play request was dropped without touching any handle.
    PlayDropped {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        reason: DropReason,
        /// Handle status at the time of the request, if a handle existed.
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<HandleStatus>,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// A handle returned an error from a command.
    CommandFailed {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        /// `"play"` or `"pause"`.
        command: &'static str,
        error: String,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The exclusive hand-off moved intent from one item to another.
    Switched {
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<FeedItemId>,
        to: FeedItemId,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The feed-wide mute flag was applied.
    MuteChanged {
        muted: bool,
        /// Number of handles the flag was broadcast to.
        handles: usize,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
}

/// Registration and per-item lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemEvent {
    /// A handle was stored for an item.
    Registered {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        /// True if a stale or duplicate handle was swapped out.
        replaced: bool,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// A second live registration for the same id was refused.
    RegistrationRejected {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// An item's mapping was removed.
    Unregistered {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        /// True if the item was still the active id when removed.
        #[serde(rename = "wasActive")]
        was_active: bool,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The reconciled per-item state changed.
    StateChanged {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        state: ItemPlaybackState,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The handle reported `Error`; the item will not play.
    Failed {
        #[serde(rename = "itemId")]
        item_id: FeedItemId,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
}

impl From<PlaybackEvent> for BroadcastEvent {
    fn from(event: PlaybackEvent) -> Self {
        BroadcastEvent::Playback(event)
    }
}

impl From<ItemEvent> for BroadcastEvent {
    fn from(event: ItemEvent) -> Self {
        BroadcastEvent::Item(event)
    }
}
