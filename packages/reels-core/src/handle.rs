//! The playable handle contract.
//!
//! A handle is the UI layer's concrete video player for one feed item. The
//! engine never constructs or destroys handles; it only forwards play, pause
//! and mute intent to them and reads their readiness.

use crate::error::HandleResult;
use crate::types::HandleStatus;

/// Capability set every concrete player must expose to the coordinator.
///
/// Implementations are owned by the UI layer and shared with the engine as
/// `Arc<dyn PlayableHandle>`; the registry only keeps a weak reference. All
/// methods take `&self`, so implementations use interior mutability.
///
/// Calls may arrive from inside another engine call (for instance `play()`
/// reporting a synchronous status change back into the feed session). The
/// engine never holds its own locks while calling into a handle.
pub trait PlayableHandle: Send + Sync {
    /// Starts or resumes playback.
    fn play(&self) -> HandleResult<()>;

    /// Pauses playback. Must be safe to call on a handle that is not playing.
    fn pause(&self) -> HandleResult<()>;

    /// Applies the shared feed-wide mute flag.
    fn set_muted(&self, muted: bool);

    /// Returns the mute flag currently applied to this handle.
    fn is_muted(&self) -> bool;

    /// Returns the handle's current readiness.
    fn status(&self) -> HandleStatus;
}
