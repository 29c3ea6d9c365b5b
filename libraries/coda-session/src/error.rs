//! Error types for queue management

use coda_core::QueueItemId;
use thiserror::Error;

/// Queue session errors
///
/// Structural errors only: they indicate caller-supplied invalid identifiers
/// or indices and are never retried internally. Empty-queue navigation is a
/// benign `SkipOutcome`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No queue item with the given id
    #[error("Queue item not found: {0}")]
    NotFound(QueueItemId),

    /// Index outside the queue bounds
    #[error("Index {index} out of range for queue of length {len}")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Queue length at the time of the call
        len: usize,
    },

    /// Operation requires a non-empty queue
    #[error("Queue is empty")]
    EmptyQueue,
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, SessionError>;
