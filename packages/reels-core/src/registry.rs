//! Feed item to playable handle bookkeeping.
//!
//! The registry holds weak references only. The UI layer owns every handle;
//! a handle dropped without being unregistered is treated exactly like an
//! unknown id on every lookup and is replaced on the next registration.

use std::sync::{Arc, Weak};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::DuplicatePolicy;
use crate::handle::PlayableHandle;
use crate::types::FeedItemId;

/// Result of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// No mapping existed; the handle was stored.
    Registered,
    /// A stale handle, or a live one under [`DuplicatePolicy::Replace`], was swapped out.
    Replaced,
    /// The exact same handle was already registered under this id.
    Unchanged,
    /// A different live handle is registered and the policy is [`DuplicatePolicy::Reject`].
    Rejected,
}

impl RegisterOutcome {
    /// Returns true if the given handle is now the one registered for the id.
    #[must_use]
    pub fn is_stored(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Mapping from feed item id to its current handle.
///
/// At most one handle per id. Lookups never fail for unknown ids.
#[derive(Default)]
pub struct PlaybackRegistry {
    handles: DashMap<FeedItemId, Weak<dyn PlayableHandle>>,
}

impl PlaybackRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handle` under `id` and applies `muted` to it.
    ///
    /// The mute flag is only applied when the handle ends up stored.
    pub fn register(
        &self,
        id: FeedItemId,
        handle: &Arc<dyn PlayableHandle>,
        muted: bool,
        policy: DuplicatePolicy,
    ) -> RegisterOutcome {
        let outcome = match self.handles.entry(id) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get();
                if existing.ptr_eq(&Arc::downgrade(handle)) {
                    RegisterOutcome::Unchanged
                } else if existing.strong_count() > 0 && policy == DuplicatePolicy::Reject {
                    log::warn!(
                        "[Registry] {} already has a live handle, rejecting re-registration",
                        slot.key()
                    );
                    RegisterOutcome::Rejected
                } else {
                    if existing.strong_count() > 0 {
                        log::warn!(
                            "[Registry] {} re-registered without unregister, replacing handle",
                            slot.key()
                        );
                    }
                    slot.insert(Arc::downgrade(handle));
                    RegisterOutcome::Replaced
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::downgrade(handle));
                RegisterOutcome::Registered
            }
        };

        // Entry guard is released above; the handle may call back into us.
        if outcome.is_stored() {
            handle.set_muted(muted);
        }
        outcome
    }

    /// Removes the mapping for `id`. Returns true if one existed.
    pub fn unregister(&self, id: &FeedItemId) -> bool {
        self.handles.remove(id).is_some()
    }

    /// Returns the live handle for `id`, if any.
    pub fn get(&self, id: &FeedItemId) -> Option<Arc<dyn PlayableHandle>> {
        self.handles.get(id).and_then(|weak| weak.upgrade())
    }

    /// Returns true if `id` maps to a live handle.
    pub fn contains(&self, id: &FeedItemId) -> bool {
        self.handles
            .get(id)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Returns a snapshot of every live handle.
    ///
    /// The snapshot is a copy: registering or unregistering while iterating
    /// it is safe and not reflected in it.
    pub fn all(&self) -> Vec<(FeedItemId, Arc<dyn PlayableHandle>)> {
        self.handles
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .upgrade()
                    .map(|handle| (entry.key().clone(), handle))
            })
            .collect()
    }

    /// Returns the ids of every mapping, live or stale.
    pub fn ids(&self) -> Vec<FeedItemId> {
        self.handles.iter().map(|r| r.key().clone()).collect()
    }

    /// Drops mappings whose handle no longer exists. Returns how many were removed.
    pub fn prune_stale(&self) -> usize {
        let before = self.handles.len();
        self.handles.retain(|_, weak| weak.strong_count() > 0);
        before.saturating_sub(self.handles.len())
    }

    /// Number of mappings, including stale ones.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if there are no mappings.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
