//! Centralized error types for the reels coordination engine.
//!
//! Routine races (fast scrolling past a buffering item, mount/unmount
//! reordering) are NOT errors: they surface as [`PlayOutcome`] and
//! [`RegisterOutcome`] values. The types here cover backend command failures
//! and configuration problems only.
//!
//! [`PlayOutcome`]: crate::coordinator::PlayOutcome
//! [`RegisterOutcome`]: crate::registry::RegisterOutcome

use serde::Serialize;
use thiserror::Error;

/// Trait for error types that provide machine-readable error codes.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;
}

/// Failure reported by a [`PlayableHandle`](crate::handle::PlayableHandle)
/// when executing a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandleError {
    /// The playback backend rejected or failed the command.
    #[error("playback backend failed: {0}")]
    Backend(String),

    /// The handle has already released its player resources.
    #[error("handle released")]
    Released,
}

impl ErrorCode for HandleError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "backend_failed",
            Self::Released => "handle_released",
        }
    }
}

/// Result alias for handle commands.
pub type HandleResult<T> = Result<T, HandleError>;

/// Application-wide error type.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ReelsError {
    /// Invalid coordinator configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ErrorCode for ReelsError {
    fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
        }
    }
}

/// Convenient Result alias for engine-wide operations.
pub type ReelsResult<T> = Result<T, ReelsError>;
