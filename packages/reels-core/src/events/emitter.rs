//! Event emitter abstraction for decoupling the engine from transport.
//!
//! The coordinator depends on the [`EventEmitter`] trait rather than a
//! concrete channel, so tests can count events and hosts can forward them to
//! whatever UI bridge they use.

use super::{ItemEvent, PlaybackEvent};

/// Trait for emitting engine events without knowledge of transport.
///
/// # Example
///
/// ```ignore
/// let coordinator = PlaybackCoordinator::new(config, Arc::new(LoggingEventEmitter));
/// ```
pub trait EventEmitter: Send + Sync {
    /// Emits a playback decision event.
    fn emit_playback(&self, event: PlaybackEvent);

    /// Emits an item lifecycle event.
    fn emit_item(&self, event: ItemEvent);
}

/// No-op emitter for hosts that do not observe events.
pub struct NoopEventEmitter;

impl EventEmitter for NoopEventEmitter {
    fn emit_playback(&self, _event: PlaybackEvent) {}

    fn emit_item(&self, _event: ItemEvent) {}
}

/// Logging emitter for debugging and development.
///
/// Logs all events at debug level.
pub struct LoggingEventEmitter;

impl EventEmitter for LoggingEventEmitter {
    fn emit_playback(&self, event: PlaybackEvent) {
        tracing::debug!(?event, "playback_event");
    }

    fn emit_item(&self, event: ItemEvent) {
        tracing::debug!(?event, "item_event");
    }
}
