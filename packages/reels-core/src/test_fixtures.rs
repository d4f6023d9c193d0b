//! Shared test fixtures: a recording playable handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{HandleError, HandleResult};
use crate::handle::PlayableHandle;
use crate::types::HandleStatus;

/// One command received by a [`MockHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Play(&'static str),
    Pause(&'static str),
    Mute(&'static str, bool),
}

/// Call log shared by every handle in a test, so ordering across handles
/// can be asserted.
pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Returns the play/pause calls only, in order.
pub fn playback_calls(log: &CallLog) -> Vec<Call> {
    log.lock()
        .iter()
        .filter(|c| !matches!(c, Call::Mute(..)))
        .cloned()
        .collect()
}

pub struct MockHandle {
    name: &'static str,
    status: Mutex<HandleStatus>,
    muted: AtomicBool,
    fail_play: AtomicBool,
    log: CallLog,
}

impl MockHandle {
    pub fn new(name: &'static str, status: HandleStatus, log: &CallLog) -> Arc<Self> {
        Arc::new(Self {
            name,
            status: Mutex::new(status),
            muted: AtomicBool::new(false),
            fail_play: AtomicBool::new(false),
            log: Arc::clone(log),
        })
    }

    pub fn ready(name: &'static str, log: &CallLog) -> Arc<Self> {
        Self::new(name, HandleStatus::ReadyToPlay, log)
    }

    pub fn loading(name: &'static str, log: &CallLog) -> Arc<Self> {
        Self::new(name, HandleStatus::Loading, log)
    }

    pub fn set_status(&self, status: HandleStatus) {
        *self.status.lock() = status;
    }

    pub fn fail_next_plays(&self) {
        self.fail_play.store(true, Ordering::SeqCst);
    }
}

impl PlayableHandle for MockHandle {
    fn play(&self) -> HandleResult<()> {
        if self.fail_play.load(Ordering::SeqCst) {
            return Err(HandleError::Backend("decoder unavailable".into()));
        }
        self.log.lock().push(Call::Play(self.name));
        Ok(())
    }

    fn pause(&self) -> HandleResult<()> {
        self.log.lock().push(Call::Pause(self.name));
        Ok(())
    }

    fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
        self.log.lock().push(Call::Mute(self.name, muted));
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    fn status(&self) -> HandleStatus {
        *self.status.lock()
    }
}
