//! Inbound feed events and per-item reconciliation.
//!
//! [`FeedSession`] is the boundary the UI layer talks to. It translates
//! list-viewability, screen-focus, mount/unmount and handle status callbacks
//! into coordinator operations, and keeps one [`ItemPlaybackState`] per
//! mounted item so that a readiness report arriving after the visibility
//! signal still starts playback.
//!
//! The session remembers the latest visible target (`pending`). A switch to a
//! still-loading item is dropped by the coordinator; when that item later
//! reports `ReadyToPlay` the session re-issues the switch. While the screen
//! is blurred, or nothing is sufficiently visible, readiness never starts
//! playback; focus regained re-asserts the intent instead.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::coordinator::{PlayOutcome, PlaybackCoordinator};
use crate::events::ItemEvent;
use crate::handle::PlayableHandle;
use crate::item_state::{transition, ItemInput, ItemPlaybackState, Reconcile};
use crate::registry::RegisterOutcome;
use crate::types::{FeedItemId, HandleStatus};
use crate::utils::now_millis;

/// Every inbound signal the UI layer can deliver.
#[derive(Clone)]
pub enum FeedEvent {
    /// A feed item mounted with its player.
    ItemMounted {
        id: FeedItemId,
        handle: Arc<dyn PlayableHandle>,
    },
    /// A feed item unmounted.
    ItemUnmounted { id: FeedItemId },
    /// A player reported new readiness.
    HandleStatusChanged {
        id: FeedItemId,
        status: HandleStatus,
    },
    /// The most visible item changed; `None` when nothing is visible enough.
    VisibilityChanged { id: Option<FeedItemId> },
    /// The feed screen gained or lost focus (navigation, app backgrounded).
    ScreenFocusChanged { focused: bool },
    /// The user hit the mute button.
    MuteToggleRequested,
    /// The mute flag was set explicitly.
    MuteSet { muted: bool },
}

impl fmt::Debug for FeedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemMounted { id, handle } => f
                .debug_struct("ItemMounted")
                .field("id", id)
                .field("status", &handle.status())
                .finish(),
            Self::ItemUnmounted { id } => f.debug_struct("ItemUnmounted").field("id", id).finish(),
            Self::HandleStatusChanged { id, status } => f
                .debug_struct("HandleStatusChanged")
                .field("id", id)
                .field("status", status)
                .finish(),
            Self::VisibilityChanged { id } => {
                f.debug_struct("VisibilityChanged").field("id", id).finish()
            }
            Self::ScreenFocusChanged { focused } => f
                .debug_struct("ScreenFocusChanged")
                .field("focused", focused)
                .finish(),
            Self::MuteToggleRequested => f.write_str("MuteToggleRequested"),
            Self::MuteSet { muted } => f.debug_struct("MuteSet").field("muted", muted).finish(),
        }
    }
}

#[derive(Debug)]
struct SessionFlags {
    /// Latest visible target, kept until replaced or nothing is visible.
    pending: Option<FeedItemId>,
    focused: bool,
    visible: bool,
}

impl SessionFlags {
    fn is_suspended(&self) -> bool {
        !self.focused || !self.visible
    }
}

/// Per-feed session driving a shared [`PlaybackCoordinator`].
pub struct FeedSession {
    coordinator: Arc<PlaybackCoordinator>,
    items: DashMap<FeedItemId, ItemPlaybackState>,
    flags: Mutex<SessionFlags>,
}

impl FeedSession {
    /// Creates a session. The screen starts focused.
    pub fn new(coordinator: Arc<PlaybackCoordinator>) -> Self {
        Self {
            coordinator,
            items: DashMap::new(),
            flags: Mutex::new(SessionFlags {
                pending: None,
                focused: true,
                visible: true,
            }),
        }
    }

    /// The coordinator this session drives.
    pub fn coordinator(&self) -> &Arc<PlaybackCoordinator> {
        &self.coordinator
    }

    /// Reconciled state of `id`; `Unregistered` for unknown ids.
    pub fn item_state(&self, id: &FeedItemId) -> ItemPlaybackState {
        self.items.get(id).map(|s| *s).unwrap_or_default()
    }

    /// The latest visible target, if any.
    pub fn pending_id(&self) -> Option<FeedItemId> {
        self.flags.lock().pending.clone()
    }

    /// Whether the feed screen currently has focus.
    pub fn is_focused(&self) -> bool {
        self.flags.lock().focused
    }

    /// Routes an inbound event to its handler.
    pub fn dispatch(&self, event: FeedEvent) {
        log::trace!("[FeedSession] dispatch {:?}", event);
        match event {
            FeedEvent::ItemMounted { id, handle } => {
                self.on_item_mounted(id, handle);
            }
            FeedEvent::ItemUnmounted { id } => {
                self.on_item_unmounted(&id);
            }
            FeedEvent::HandleStatusChanged { id, status } => {
                self.on_handle_status_changed(&id, status);
            }
            FeedEvent::VisibilityChanged { id } => self.on_visibility_changed(id),
            FeedEvent::ScreenFocusChanged { focused } => self.on_screen_focus_changed(focused),
            FeedEvent::MuteToggleRequested => {
                self.on_mute_toggle_requested();
            }
            FeedEvent::MuteSet { muted } => self.on_mute_set(muted),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mount / unmount
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers the item's handle.
    ///
    /// A second mount for an id with a live handle never re-registers,
    /// whatever the coordinator's duplicate policy: the mapping is kept and
    /// the outcome is `Unchanged` for the same handle, `Rejected` otherwise.
    /// If the item is already the pending target and its handle is ready,
    /// playback starts right away.
    pub fn on_item_mounted(
        &self,
        id: impl Into<FeedItemId>,
        handle: Arc<dyn PlayableHandle>,
    ) -> RegisterOutcome {
        let id = id.into();
        if let Some(existing) = self.coordinator.handle(&id) {
            if Arc::ptr_eq(&existing, &handle) {
                return RegisterOutcome::Unchanged;
            }
            log::warn!(
                "[FeedSession] {} mounted again while its handle is live, keeping the first",
                id
            );
            self.coordinator.emitter().emit_item(ItemEvent::RegistrationRejected {
                item_id: id,
                timestamp: now_millis(),
            });
            return RegisterOutcome::Rejected;
        }

        let status = handle.status();
        let outcome = self.coordinator.register(id.clone(), handle);
        if matches!(outcome, RegisterOutcome::Registered | RegisterOutcome::Replaced) {
            let (state, action) = transition(
                ItemPlaybackState::Unregistered,
                ItemInput::Mounted(status),
                self.wants(&id),
            );
            self.set_state(&id, state);
            self.perform(&id, action);
            self.refresh_states();
        }
        outcome
    }

    /// Unregisters the item. Does not pause it.
    pub fn on_item_unmounted(&self, id: &FeedItemId) -> bool {
        let removed = self.coordinator.unregister(id);
        if self.items.remove(id).is_some() {
            self.emit_state(id, ItemPlaybackState::Unregistered);
        }
        removed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Readiness
    // ─────────────────────────────────────────────────────────────────────────

    /// Reconciles a readiness report against the current intent.
    pub fn on_handle_status_changed(&self, id: &FeedItemId, status: HandleStatus) {
        let Some(current) = self.items.get(id).map(|s| *s) else {
            log::debug!("[FeedSession] status {:?} for unmounted item {}", status, id);
            return;
        };

        let (next, action) = transition(current, ItemInput::StatusChanged(status), self.wants(id));
        self.set_state(id, next);
        self.perform(id, action);
        self.refresh_states();
    }

    fn wants(&self, id: &FeedItemId) -> bool {
        let pending = {
            let flags = self.flags.lock();
            if flags.is_suspended() {
                return false;
            }
            flags.pending.clone()
        };
        pending.as_ref() == Some(id) || self.coordinator.active_id().as_ref() == Some(id)
    }

    fn perform(&self, id: &FeedItemId, action: Reconcile) {
        match action {
            Reconcile::None => {}
            Reconcile::Resume => {
                let outcome = if self.coordinator.active_id().as_ref() == Some(id) {
                    self.coordinator.single_play()
                } else {
                    self.coordinator.switch(id)
                };
                log::debug!("[FeedSession] {} ready, resumed: {:?}", id, outcome);
            }
            Reconcile::Failed => {
                log::warn!("[FeedSession] {} reported an error and will not play", id);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Visibility and focus
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a viewability change.
    ///
    /// `Some(id)` switches to the item (deferred while blurred). `None`
    /// pauses the active item without clearing the intent, so it resumes when
    /// it becomes visible again.
    pub fn on_visibility_changed(&self, next: Option<FeedItemId>) {
        match next {
            None => {
                {
                    let mut flags = self.flags.lock();
                    flags.visible = false;
                    flags.pending = None;
                }
                self.coordinator.single_pause();
            }
            Some(id) => {
                let (focused, was_visible) = {
                    let mut flags = self.flags.lock();
                    let was_visible = flags.visible;
                    flags.visible = true;
                    flags.pending = Some(id.clone());
                    (flags.focused, was_visible)
                };

                if focused {
                    let outcome = if !was_visible
                        && self.coordinator.active_id().as_ref() == Some(&id)
                    {
                        self.coordinator.single_play()
                    } else {
                        self.coordinator.switch(&id)
                    };
                    if let PlayOutcome::Dropped(reason) = outcome {
                        log::debug!("[FeedSession] {} not playable yet: {:?}", id, reason);
                    }
                } else {
                    log::debug!("[FeedSession] {} visible while blurred, deferring", id);
                }
            }
        }
        self.refresh_states();
    }

    /// Applies a screen focus change.
    ///
    /// Blur pauses the active item whatever its readiness. Focus re-asserts
    /// the intent, or switches to a target that became visible while blurred.
    pub fn on_screen_focus_changed(&self, focused: bool) {
        let (pending, visible) = {
            let mut flags = self.flags.lock();
            flags.focused = focused;
            (flags.pending.clone(), flags.visible)
        };

        if !focused {
            self.coordinator.single_pause();
        } else if visible {
            let active = self.coordinator.active_id();
            match pending {
                Some(target) if active.as_ref() != Some(&target) => {
                    self.coordinator.switch(&target);
                }
                _ if active.is_some() => {
                    self.coordinator.single_play();
                }
                _ => {}
            }
        }
        self.refresh_states();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mute
    // ─────────────────────────────────────────────────────────────────────────

    /// Flips the feed-wide mute flag. Returns the new value.
    pub fn on_mute_toggle_requested(&self) -> bool {
        self.coordinator.toggle_mute()
    }

    /// Sets the feed-wide mute flag.
    pub fn on_mute_set(&self, muted: bool) {
        self.coordinator.set_mute(muted);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State bookkeeping
    // ─────────────────────────────────────────────────────────────────────────

    fn set_state(&self, id: &FeedItemId, state: ItemPlaybackState) {
        let previous = self.items.insert(id.clone(), state);
        if previous == Some(state) {
            return;
        }
        self.emit_state(id, state);
        if state == ItemPlaybackState::Error {
            self.coordinator.emitter().emit_item(ItemEvent::Failed {
                item_id: id.clone(),
                timestamp: now_millis(),
            });
        }
    }

    fn emit_state(&self, id: &FeedItemId, state: ItemPlaybackState) {
        self.coordinator.emitter().emit_item(ItemEvent::StateChanged {
            item_id: id.clone(),
            state,
            timestamp: now_millis(),
        });
    }

    /// Re-derives every non-terminal item from the coordinator's intent and
    /// the handles' readiness. Items whose handle was dropped without an
    /// unmount are forgotten.
    fn refresh_states(&self) {
        let suspended = self.flags.lock().is_suspended();
        let active = self.coordinator.active_id();
        let snapshot: Vec<(FeedItemId, ItemPlaybackState)> = self
            .items
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();

        for (id, state) in snapshot {
            let Some(handle) = self.coordinator.handle(&id) else {
                if self.items.remove(&id).is_some() {
                    log::debug!("[FeedSession] {} handle dropped without unmount", id);
                    self.emit_state(&id, ItemPlaybackState::Unregistered);
                }
                continue;
            };
            if state.is_terminal() {
                continue;
            }
            let wanted = !suspended && active.as_ref() == Some(&id);
            self.set_state(&id, ItemPlaybackState::derive(wanted, handle.status()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CoordinatorConfig, DuplicatePolicy};
    use crate::events::{BroadcastEvent, NoopEventEmitter};
    use crate::test_fixtures::{call_log, playback_calls, Call, MockHandle};

    fn session() -> FeedSession {
        let coordinator =
            PlaybackCoordinator::new(&CoordinatorConfig::default(), Arc::new(NoopEventEmitter));
        FeedSession::new(Arc::new(coordinator))
    }

    fn id(s: &str) -> FeedItemId {
        FeedItemId::from(s)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Race resolution
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn readiness_after_visibility_starts_playback() {
        let log = call_log();
        let s = session();
        let a = MockHandle::loading("a", &log);
        s.on_item_mounted("a", a.clone());

        s.on_visibility_changed(Some(id("a")));
        assert!(playback_calls(&log).is_empty());
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Loading);

        a.set_status(HandleStatus::ReadyToPlay);
        s.on_handle_status_changed(&id("a"), HandleStatus::ReadyToPlay);

        assert_eq!(playback_calls(&log), vec![Call::Play("a")]);
        assert_eq!(s.coordinator().active_id(), Some(id("a")));
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Playing);
    }

    #[test]
    fn readiness_of_item_scrolled_past_does_not_play() {
        let log = call_log();
        let s = session();
        let a = MockHandle::loading("a", &log);
        let b = MockHandle::ready("b", &log);
        s.on_item_mounted("a", a.clone());
        s.on_item_mounted("b", b.clone());

        s.on_visibility_changed(Some(id("a")));
        s.on_visibility_changed(Some(id("b")));
        a.set_status(HandleStatus::ReadyToPlay);
        s.on_handle_status_changed(&id("a"), HandleStatus::ReadyToPlay);

        assert_eq!(playback_calls(&log), vec![Call::Play("b")]);
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Ready);
        assert_eq!(s.item_state(&id("b")), ItemPlaybackState::Playing);
    }

    #[test]
    fn visibility_before_mount_plays_on_mount() {
        let log = call_log();
        let s = session();

        s.on_visibility_changed(Some(id("a")));
        let a = MockHandle::ready("a", &log);
        s.on_item_mounted("a", a.clone());

        assert_eq!(playback_calls(&log), vec![Call::Play("a")]);
    }

    #[test]
    fn readiness_while_blurred_waits_for_focus() {
        let log = call_log();
        let s = session();
        let a = MockHandle::loading("a", &log);
        s.on_item_mounted("a", a.clone());
        s.on_visibility_changed(Some(id("a")));
        s.on_screen_focus_changed(false);

        a.set_status(HandleStatus::ReadyToPlay);
        s.on_handle_status_changed(&id("a"), HandleStatus::ReadyToPlay);
        assert!(playback_calls(&log).is_empty());

        s.on_screen_focus_changed(true);
        assert_eq!(playback_calls(&log), vec![Call::Play("a")]);
    }

    #[test]
    fn rebuffer_of_active_item_reasserts_play() {
        let log = call_log();
        let s = session();
        let a = MockHandle::ready("a", &log);
        s.on_item_mounted("a", a.clone());
        s.on_visibility_changed(Some(id("a")));

        a.set_status(HandleStatus::Loading);
        s.on_handle_status_changed(&id("a"), HandleStatus::Loading);
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Loading);
        a.set_status(HandleStatus::ReadyToPlay);
        s.on_handle_status_changed(&id("a"), HandleStatus::ReadyToPlay);

        assert_eq!(playback_calls(&log), vec![Call::Play("a"), Call::Play("a")]);
        assert_eq!(s.coordinator().active_id(), Some(id("a")));
    }

    #[test]
    fn duplicate_ready_report_does_not_replay() {
        let log = call_log();
        let s = session();
        let a = MockHandle::ready("a", &log);
        s.on_item_mounted("a", a.clone());
        s.on_visibility_changed(Some(id("a")));

        s.on_handle_status_changed(&id("a"), HandleStatus::ReadyToPlay);

        assert_eq!(playback_calls(&log), vec![Call::Play("a")]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Errors
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn error_status_is_terminal_and_reported() {
        let log = call_log();
        let (coordinator, bridge) =
            PlaybackCoordinator::with_broadcast(&CoordinatorConfig::default()).unwrap();
        let mut rx = bridge.subscribe();
        let s = FeedSession::new(Arc::new(coordinator));
        let a = MockHandle::loading("a", &log);
        s.on_item_mounted("a", a.clone());
        s.on_visibility_changed(Some(id("a")));

        a.set_status(HandleStatus::Error);
        s.on_handle_status_changed(&id("a"), HandleStatus::Error);
        a.set_status(HandleStatus::ReadyToPlay);
        s.on_handle_status_changed(&id("a"), HandleStatus::ReadyToPlay);

        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Error);
        assert!(playback_calls(&log).is_empty());

        let mut failures = 0;
        while let Ok(event) = rx.try_recv() {
            if let BroadcastEvent::Item(ItemEvent::Failed { item_id, .. }) = event {
                assert_eq!(item_id, id("a"));
                failures += 1;
            }
        }
        assert_eq!(failures, 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Visibility and focus
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn nothing_visible_pauses_and_keeps_intent() {
        let log = call_log();
        let s = session();
        let a = MockHandle::ready("a", &log);
        s.on_item_mounted("a", a.clone());
        s.on_visibility_changed(Some(id("a")));

        s.on_visibility_changed(None);
        assert_eq!(s.coordinator().active_id(), Some(id("a")));
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Ready);

        s.on_visibility_changed(Some(id("a")));
        assert_eq!(
            playback_calls(&log),
            vec![Call::Play("a"), Call::Pause("a"), Call::Play("a")]
        );
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Playing);
    }

    #[test]
    fn blur_and_focus_pause_and_resume_active() {
        let log = call_log();
        let s = session();
        let a = MockHandle::ready("a", &log);
        s.on_item_mounted("a", a.clone());
        s.on_visibility_changed(Some(id("a")));

        s.on_screen_focus_changed(false);
        assert!(!s.is_focused());
        s.on_screen_focus_changed(true);

        assert_eq!(
            playback_calls(&log),
            vec![Call::Play("a"), Call::Pause("a"), Call::Play("a")]
        );
    }

    #[test]
    fn visibility_while_blurred_switches_on_focus() {
        let log = call_log();
        let s = session();
        let a = MockHandle::ready("a", &log);
        let b = MockHandle::ready("b", &log);
        s.on_item_mounted("a", a.clone());
        s.on_item_mounted("b", b.clone());
        s.on_visibility_changed(Some(id("a")));

        s.on_screen_focus_changed(false);
        s.on_visibility_changed(Some(id("b")));
        assert_eq!(s.pending_id(), Some(id("b")));
        s.on_screen_focus_changed(true);

        assert_eq!(
            playback_calls(&log),
            vec![
                Call::Play("a"),
                Call::Pause("a"),
                Call::Pause("a"),
                Call::Play("b")
            ]
        );
        assert_eq!(s.coordinator().active_id(), Some(id("b")));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mount / unmount / mute
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn repeated_mount_does_not_reregister() {
        let log = call_log();
        let s = session();
        let first = MockHandle::ready("first", &log);
        let second = MockHandle::ready("second", &log);

        assert_eq!(s.on_item_mounted("a", first.clone()), RegisterOutcome::Registered);
        assert_eq!(s.on_item_mounted("a", first.clone()), RegisterOutcome::Unchanged);
        assert_eq!(s.on_item_mounted("a", second.clone()), RegisterOutcome::Rejected);

        s.on_visibility_changed(Some(id("a")));
        assert_eq!(playback_calls(&log), vec![Call::Play("first")]);
    }

    #[test]
    fn remount_under_replace_policy_keeps_single_player() {
        let log = call_log();
        let config = CoordinatorConfig {
            duplicate_registration: DuplicatePolicy::Replace,
            ..Default::default()
        };
        let coordinator = PlaybackCoordinator::new(&config, Arc::new(NoopEventEmitter));
        let s = FeedSession::new(Arc::new(coordinator));
        let first = MockHandle::ready("first", &log);
        let second = MockHandle::ready("second", &log);
        let b = MockHandle::ready("b", &log);
        s.on_item_mounted("a", first.clone());
        s.on_item_mounted("b", b.clone());
        s.on_visibility_changed(Some(id("a")));

        assert_eq!(s.on_item_mounted("a", second.clone()), RegisterOutcome::Rejected);
        s.on_visibility_changed(Some(id("b")));

        assert_eq!(
            playback_calls(&log),
            vec![Call::Play("first"), Call::Pause("first"), Call::Play("b")]
        );
        assert_eq!(s.coordinator().active_id(), Some(id("b")));
    }

    #[test]
    fn dropped_handle_state_is_forgotten() {
        let log = call_log();
        let s = session();
        let a = MockHandle::ready("a", &log);
        s.on_item_mounted("a", a.clone());
        s.on_visibility_changed(Some(id("a")));
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Playing);

        drop(a);
        s.on_visibility_changed(None);

        assert!(!s.items.contains_key(&id("a")));
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Unregistered);
    }

    #[test]
    fn unmount_forgets_state_without_pausing() {
        let log = call_log();
        let s = session();
        let a = MockHandle::ready("a", &log);
        s.on_item_mounted("a", a.clone());
        s.on_visibility_changed(Some(id("a")));

        assert!(s.on_item_unmounted(&id("a")));
        assert_eq!(s.item_state(&id("a")), ItemPlaybackState::Unregistered);
        assert_eq!(playback_calls(&log), vec![Call::Play("a")]);

        s.on_handle_status_changed(&id("a"), HandleStatus::ReadyToPlay);
        assert_eq!(playback_calls(&log), vec![Call::Play("a")]);
    }

    #[test]
    fn dispatch_routes_every_event() {
        let log = call_log();
        let s = session();
        let a = MockHandle::loading("a", &log);

        s.dispatch(FeedEvent::ItemMounted {
            id: id("a"),
            handle: a.clone(),
        });
        s.dispatch(FeedEvent::MuteSet { muted: true });
        s.dispatch(FeedEvent::VisibilityChanged { id: Some(id("a")) });
        a.set_status(HandleStatus::ReadyToPlay);
        s.dispatch(FeedEvent::HandleStatusChanged {
            id: id("a"),
            status: HandleStatus::ReadyToPlay,
        });
        s.dispatch(FeedEvent::MuteToggleRequested);
        s.dispatch(FeedEvent::ScreenFocusChanged { focused: false });
        s.dispatch(FeedEvent::ItemUnmounted { id: id("a") });

        assert!(!a.is_muted());
        assert_eq!(
            *log.lock(),
            vec![
                Call::Mute("a", false),
                Call::Mute("a", true),
                Call::Play("a"),
                Call::Mute("a", false),
                Call::Pause("a"),
            ]
        );
        assert!(s.coordinator().registry().is_empty());
    }

    #[test]
    fn feed_event_debug_hides_handle_internals() {
        let log = call_log();
        let event = FeedEvent::ItemMounted {
            id: id("a"),
            handle: MockHandle::loading("a", &log),
        };
        let text = format!("{event:?}");
        assert!(text.contains("ItemMounted"));
        assert!(text.contains("Loading"));
    }
}
