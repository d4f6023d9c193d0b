//! Simulated players standing in for real video handles.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use reels_core::{FeedItemId, HandleError, HandleResult, HandleStatus, PlayableHandle};
use serde::Serialize;

/// Command received by a simulated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HandleCommand {
    Play,
    Pause,
    Mute { muted: bool },
}

/// One recorded command with the scenario step that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    pub step: usize,
    pub item_id: FeedItemId,
    #[serde(flatten)]
    pub command: HandleCommand,
}

/// Ordered command log shared by every simulated player in a run.
#[derive(Clone, Default)]
pub struct Trace {
    step: Arc<AtomicUsize>,
    entries: Arc<Mutex<Vec<TraceEntry>>>,
}

impl Trace {
    pub fn begin_step(&self, step: usize) {
        self.step.store(step, Ordering::SeqCst);
    }

    fn record(&self, item_id: &FeedItemId, command: HandleCommand) {
        self.entries.lock().push(TraceEntry {
            step: self.step.load(Ordering::SeqCst),
            item_id: item_id.clone(),
            command,
        });
    }

    pub fn entries(&self) -> Vec<TraceEntry> {
        self.entries.lock().clone()
    }
}

/// A player whose readiness is driven by the scenario.
pub struct SimulatedHandle {
    id: FeedItemId,
    status: RwLock<HandleStatus>,
    muted: AtomicBool,
    fail_play: bool,
    trace: Trace,
}

impl SimulatedHandle {
    pub fn new(id: FeedItemId, status: HandleStatus, fail_play: bool, trace: Trace) -> Arc<Self> {
        Arc::new(Self {
            id,
            status: RwLock::new(status),
            muted: AtomicBool::new(false),
            fail_play,
            trace,
        })
    }

    pub fn set_status(&self, status: HandleStatus) {
        *self.status.write() = status;
    }
}

impl PlayableHandle for SimulatedHandle {
    fn play(&self) -> HandleResult<()> {
        if self.fail_play {
            log::info!("[{}] play -> simulated failure", self.id);
            return Err(HandleError::Backend("simulated play failure".to_string()));
        }
        log::info!("[{}] play", self.id);
        self.trace.record(&self.id, HandleCommand::Play);
        Ok(())
    }

    fn pause(&self) -> HandleResult<()> {
        log::info!("[{}] pause", self.id);
        self.trace.record(&self.id, HandleCommand::Pause);
        Ok(())
    }

    fn set_muted(&self, muted: bool) {
        log::debug!("[{}] muted={}", self.id, muted);
        self.muted.store(muted, Ordering::SeqCst);
        self.trace.record(&self.id, HandleCommand::Mute { muted });
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    fn status(&self) -> HandleStatus {
        *self.status.read()
    }
}
