//! Reels Core - playback coordination for short-video feeds.
//!
//! A virtualized feed keeps one video player mounted per visible or
//! near-visible item, but at most one of them may decode and emit audio at
//! any time. This crate owns that decision and nothing else: it never decodes,
//! buffers or renders.
//!
//! # Architecture
//!
//! - [`handle`]: the [`PlayableHandle`] contract concrete players implement
//! - [`registry`]: feed item id to handle bookkeeping (weak references)
//! - [`coordinator`]: global intent and the pause-before-play switch protocol
//! - [`item_state`]: per-item readiness/intent state machine
//! - [`feed`]: inbound UI events (mount, visibility, focus, readiness, mute)
//! - [`events`]: observable decisions for UIs and tests
//! - [`config`]: coordinator configuration
//! - [`error`]: centralized error types
//!
//! # Threading
//!
//! The engine assumes one cooperative event loop delivering UI and player
//! callbacks. Shared state sits behind `DashMap`/`parking_lot` so the
//! coordinator can be handed around as `Arc`, and no lock is ever held while
//! a handle is called.

#![warn(clippy::all)]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod feed;
pub mod handle;
pub mod item_state;
pub mod registry;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use config::{CoordinatorConfig, DuplicatePolicy};
pub use coordinator::{DropReason, GlobalIntent, PlayOutcome, PlaybackCoordinator};
pub use error::{ErrorCode, HandleError, HandleResult, ReelsError, ReelsResult};
pub use events::{
    BroadcastEvent, BroadcastEventBridge, EventEmitter, ItemEvent, LoggingEventEmitter,
    NoopEventEmitter, PlaybackEvent,
};
pub use feed::{FeedEvent, FeedSession};
pub use handle::PlayableHandle;
pub use item_state::ItemPlaybackState;
pub use registry::{PlaybackRegistry, RegisterOutcome};
pub use types::{FeedItemId, HandleStatus};
pub use utils::now_millis;
