//! Per-item playback state machine.
//!
//! Reconciles a handle's asynchronous readiness against the coordinator's
//! intent for that item:
//!
//! ```text
//! Unregistered -> Loading -> Ready -> Playing -> Ready ...
//!                    |         |
//!                    +---------+--> Error (dead end)
//! ```
//!
//! The transition function is pure. [`FeedSession`](crate::feed::FeedSession)
//! owns one state per mounted item and performs the reconcile actions.

use serde::Serialize;

use crate::types::HandleStatus;

/// Reconciled state of one feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPlaybackState {
    /// No handle is registered for the item.
    #[default]
    Unregistered,
    /// Registered; the handle is idle or buffering.
    Loading,
    /// Registered and ready, but not the item that should be playing.
    Ready,
    /// The item is wanted and its handle is ready.
    Playing,
    /// The handle reported an error. Never retried.
    Error,
}

impl ItemPlaybackState {
    /// Derives the state from intent and readiness.
    ///
    /// `wanted` is true when the item is the active id and playback is not
    /// suspended (screen blurred, nothing visible).
    #[must_use]
    pub fn derive(wanted: bool, status: HandleStatus) -> Self {
        match status {
            HandleStatus::Error => Self::Error,
            HandleStatus::ReadyToPlay if wanted => Self::Playing,
            HandleStatus::ReadyToPlay => Self::Ready,
            HandleStatus::Idle | HandleStatus::Loading => Self::Loading,
        }
    }

    /// Returns true once the item can no longer play.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Inputs driving the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemInput {
    /// The item mounted with a handle in the given status.
    Mounted(HandleStatus),
    /// The handle reported a new status.
    StatusChanged(HandleStatus),
}

/// Side effect the owner of the state machine must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Nothing to do.
    None,
    /// The item is wanted and just became ready: re-issue playback, because
    /// the earlier request was dropped while the handle was not ready.
    Resume,
    /// The item just entered `Error`; report it upward.
    Failed,
}

/// Computes the next state and the action to perform.
///
/// `wanted` says whether the coordinator's intent (or a pending visibility
/// request) targets this item right now.
#[must_use]
pub fn transition(
    current: ItemPlaybackState,
    input: ItemInput,
    wanted: bool,
) -> (ItemPlaybackState, Reconcile) {
    use ItemPlaybackState as S;

    let (ItemInput::Mounted(status) | ItemInput::StatusChanged(status)) = input;

    if current.is_terminal() {
        return (current, Reconcile::None);
    }

    match status {
        HandleStatus::Error => (S::Error, Reconcile::Failed),
        HandleStatus::ReadyToPlay => match current {
            // Repeated readiness report while already playing.
            S::Playing => (S::Playing, Reconcile::None),
            _ if wanted => (S::Playing, Reconcile::Resume),
            _ => (S::Ready, Reconcile::None),
        },
        HandleStatus::Idle | HandleStatus::Loading => (S::Loading, Reconcile::None),
    }
}
