//! Single-active-player playback coordination.
//!
//! Responsibilities:
//! - Own the registry of feed item handles
//! - Own the global intent (which item should play, feed-wide mute)
//! - Enforce pause-before-play when handing playback from one item to another
//! - Drop (never queue) play requests for items that are absent or not ready
//!
//! Every operation is a finite sequence of map lookups and handle calls. No
//! lock is held while a handle is called, so handles may re-enter the engine.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::{CoordinatorConfig, DuplicatePolicy};
use crate::error::{HandleError, ReelsResult};
use crate::events::{BroadcastEventBridge, EventEmitter, ItemEvent, PlaybackEvent};
use crate::handle::PlayableHandle;
use crate::registry::{PlaybackRegistry, RegisterOutcome};
use crate::types::{FeedItemId, HandleStatus};
use crate::utils::now_millis;

/// Feed-wide playback intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalIntent {
    /// The item that should be playing, if any.
    pub active_id: Option<FeedItemId>,
    /// One mute flag shared by every handle.
    pub muted: bool,
}

/// Why a play request did not reach a handle (or failed in it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// No live handle is registered for the id.
    NotRegistered,
    /// The handle exists but is not `ReadyToPlay`.
    NotReady,
    /// The handle's `play()` returned an error.
    BackendFailed,
    /// `single_play` was called with no active id.
    NoActiveItem,
}

/// Result of a play-type request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// `play()` was invoked on the handle.
    Started,
    /// The target already was the active id; nothing was called.
    AlreadyActive,
    /// The request was dropped.
    Dropped(DropReason),
}

impl PlayOutcome {
    /// Returns true if a handle's `play()` was invoked successfully.
    #[must_use]
    pub fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }
}

/// Owner of the global intent and the handle registry.
///
/// Construct one per running feed and share it with `Arc`. All mutation of
/// the intent and the registry goes through the methods below.
pub struct PlaybackCoordinator {
    registry: PlaybackRegistry,
    intent: RwLock<GlobalIntent>,
    duplicate_policy: DuplicatePolicy,
    emitter: Arc<dyn EventEmitter>,
}

impl PlaybackCoordinator {
    /// Creates a new coordinator.
    ///
    /// # Arguments
    /// * `config` - Initial mute flag and duplicate registration policy
    /// * `emitter` - Event emitter for playback and item events
    pub fn new(config: &CoordinatorConfig, emitter: Arc<dyn EventEmitter>) -> Self {
        Self {
            registry: PlaybackRegistry::new(),
            intent: RwLock::new(GlobalIntent {
                active_id: None,
                muted: config.start_muted,
            }),
            duplicate_policy: config.duplicate_registration,
            emitter,
        }
    }

    /// Creates a coordinator emitting into a fresh broadcast bridge.
    ///
    /// Validates `config` first, since the bridge cannot be built with a
    /// zero channel capacity.
    pub fn with_broadcast(
        config: &CoordinatorConfig,
    ) -> ReelsResult<(Self, BroadcastEventBridge)> {
        config.validate()?;
        let bridge = BroadcastEventBridge::new(config.event_channel_capacity);
        let coordinator = Self::new(config, Arc::new(bridge.clone()));
        Ok((coordinator, bridge))
    }

    fn emit_playback(&self, event: PlaybackEvent) {
        self.emitter.emit_playback(event);
    }

    fn emit_item(&self, event: ItemEvent) {
        self.emitter.emit_item(event);
    }

    pub(crate) fn emitter(&self) -> &Arc<dyn EventEmitter> {
        &self.emitter
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers `handle` for `id` and applies the current mute flag to it.
    ///
    /// Under [`DuplicatePolicy::Replace`], replacing the handle of the active
    /// item pauses the outgoing handle first; it would be unreachable after
    /// the swap. The active id is kept, so `single_play` resumes the new one.
    pub fn register(
        &self,
        id: impl Into<FeedItemId>,
        handle: Arc<dyn PlayableHandle>,
    ) -> RegisterOutcome {
        let id = id.into();
        if self.duplicate_policy == DuplicatePolicy::Replace
            && self.intent.read().active_id.as_ref() == Some(&id)
        {
            if let Some(outgoing) = self.registry.get(&id) {
                if !Arc::ptr_eq(&outgoing, &handle) {
                    log::debug!("[Coordinator] pausing outgoing handle of active {}", id);
                    self.pause_handle(&id, outgoing.as_ref());
                }
            }
        }

        let muted = self.intent.read().muted;
        let outcome = self
            .registry
            .register(id.clone(), &handle, muted, self.duplicate_policy);

        match outcome {
            RegisterOutcome::Registered | RegisterOutcome::Replaced => {
                self.emit_item(ItemEvent::Registered {
                    item_id: id,
                    replaced: outcome == RegisterOutcome::Replaced,
                    timestamp: now_millis(),
                });
            }
            RegisterOutcome::Rejected => {
                self.emit_item(ItemEvent::RegistrationRejected {
                    item_id: id,
                    timestamp: now_millis(),
                });
            }
            RegisterOutcome::Unchanged => {
                log::debug!("[Coordinator] {} registered again with the same handle", id);
            }
        }
        outcome
    }

    /// Removes the mapping for `id`.
    ///
    /// Does not pause and does not clear the active id: callers pause first.
    /// A later `switch` away from a removed active id skips its handle.
    pub fn unregister(&self, id: &FeedItemId) -> bool {
        let removed = self.registry.unregister(id);
        if !removed {
            return false;
        }

        let was_active = self.intent.read().active_id.as_ref() == Some(id);
        if was_active {
            log::debug!("[Coordinator] {} unregistered while still active", id);
        }
        self.emit_item(ItemEvent::Unregistered {
            item_id: id.clone(),
            was_active,
            timestamp: now_millis(),
        });
        true
    }

    /// Returns the live handle registered for `id`.
    pub fn handle(&self, id: &FeedItemId) -> Option<Arc<dyn PlayableHandle>> {
        self.registry.get(id)
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &PlaybackRegistry {
        &self.registry
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Play / pause
    // ─────────────────────────────────────────────────────────────────────────

    /// Plays `id` if it is registered and ready, and makes it the active id.
    ///
    /// Does not pause any other item; use [`switch`](Self::switch) for
    /// exclusive hand-off. Requests for absent or unready items are dropped,
    /// not queued.
    pub fn play(&self, id: &FeedItemId) -> PlayOutcome {
        self.start(id, true)
    }

    fn start(&self, id: &FeedItemId, make_active: bool) -> PlayOutcome {
        let Some(handle) = self.registry.get(id) else {
            return self.dropped(id, DropReason::NotRegistered, None);
        };

        let status = handle.status();
        if !status.is_ready() {
            return self.dropped(id, DropReason::NotReady, Some(status));
        }

        if let Err(e) = handle.play() {
            self.command_failed(id, "play", &e);
            return PlayOutcome::Dropped(DropReason::BackendFailed);
        }

        let became_active = make_active && {
            let mut intent = self.intent.write();
            let changed = intent.active_id.as_ref() != Some(id);
            intent.active_id = Some(id.clone());
            changed
        };

        self.emit_playback(PlaybackEvent::Played {
            item_id: id.clone(),
            became_active,
            timestamp: now_millis(),
        });
        PlayOutcome::Started
    }

    fn dropped(
        &self,
        id: &FeedItemId,
        reason: DropReason,
        status: Option<HandleStatus>,
    ) -> PlayOutcome {
        log::debug!(
            "[Coordinator] play({}) dropped: {:?} (status {:?})",
            id,
            reason,
            status
        );
        self.emit_playback(PlaybackEvent::PlayDropped {
            item_id: id.clone(),
            reason,
            status,
            timestamp: now_millis(),
        });
        PlayOutcome::Dropped(reason)
    }

    fn command_failed(&self, id: &FeedItemId, command: &'static str, err: &HandleError) {
        log::warn!("[Coordinator] {}({}) failed: {}", command, id, err);
        self.emit_playback(PlaybackEvent::CommandFailed {
            item_id: id.clone(),
            command,
            error: err.to_string(),
            timestamp: now_millis(),
        });
    }

    fn pause_handle(&self, id: &FeedItemId, handle: &dyn PlayableHandle) {
        match handle.pause() {
            Ok(()) => self.emit_playback(PlaybackEvent::Paused {
                item_id: id.clone(),
                timestamp: now_millis(),
            }),
            Err(e) => self.command_failed(id, "pause", &e),
        }
    }

    /// Pauses `id` whatever its readiness, and clears the active id if it
    /// pointed at `id`.
    ///
    /// Pausing a non-active item leaves the intent untouched. Pausing an id
    /// with no live handle still clears the intent.
    pub fn pause(&self, id: &FeedItemId) {
        if let Some(handle) = self.registry.get(id) {
            self.pause_handle(id, handle.as_ref());
        }

        let mut intent = self.intent.write();
        if intent.active_id.as_ref() == Some(id) {
            intent.active_id = None;
        }
    }

    /// Hands playback to `next`, pausing the current active item first.
    ///
    /// - No active item: same as [`play`](Self::play).
    /// - `next` already active: nothing is called, so repeated visibility
    ///   signals cause no pause/resume flicker.
    /// - Otherwise: `pause(active)` strictly before `play(next)`.
    ///
    /// Last writer wins: intermediate targets of a fast fling are each paused
    /// and played in call order.
    pub fn switch(&self, next: &FeedItemId) -> PlayOutcome {
        let current = self.active_id();
        if current.as_ref() == Some(next) {
            log::trace!("[Coordinator] switch({}) ignored: already active", next);
            return PlayOutcome::AlreadyActive;
        }

        if let Some(ref previous) = current {
            self.pause(previous);
        }

        let outcome = self.play(next);
        if outcome.is_started() {
            self.emit_playback(PlaybackEvent::Switched {
                from: current,
                to: next.clone(),
                timestamp: now_millis(),
            });
        }
        outcome
    }

    /// Re-asserts the current intent: plays the active item's handle without
    /// changing the active id.
    pub fn single_play(&self) -> PlayOutcome {
        match self.active_id() {
            Some(id) => self.start(&id, false),
            None => PlayOutcome::Dropped(DropReason::NoActiveItem),
        }
    }

    /// Pauses the active item's handle without changing the active id.
    ///
    /// Returns true if a handle was paused.
    pub fn single_pause(&self) -> bool {
        let Some(id) = self.active_id() else {
            return false;
        };
        match self.registry.get(&id) {
            Some(handle) => {
                self.pause_handle(&id, handle.as_ref());
                true
            }
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mute
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets the feed-wide mute flag and applies it to every registered handle.
    pub fn set_mute(&self, muted: bool) {
        self.intent.write().muted = muted;
        self.broadcast_mute(muted);
    }

    /// Flips the feed-wide mute flag. Returns the new value.
    pub fn toggle_mute(&self) -> bool {
        let muted = {
            let mut intent = self.intent.write();
            intent.muted = !intent.muted;
            intent.muted
        };
        self.broadcast_mute(muted);
        muted
    }

    fn broadcast_mute(&self, muted: bool) {
        let handles = self.registry.all();
        for (_, handle) in &handles {
            handle.set_muted(muted);
        }
        log::debug!(
            "[Coordinator] mute={} applied to {} handle(s)",
            muted,
            handles.len()
        );
        self.emit_playback(PlaybackEvent::MuteChanged {
            muted,
            handles: handles.len(),
            timestamp: now_millis(),
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The item that should be playing.
    pub fn active_id(&self) -> Option<FeedItemId> {
        self.intent.read().active_id.clone()
    }

    /// The feed-wide mute flag.
    pub fn is_muted(&self) -> bool {
        self.intent.read().muted
    }

    /// Snapshot of the global intent.
    pub fn intent(&self) -> GlobalIntent {
        self.intent.read().clone()
    }
}
