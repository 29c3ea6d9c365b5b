//! Core types for queue management

use chrono::{DateTime, Utc};
use coda_core::{QueueItemId, RepeatMode, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single queue slot
///
/// References a catalog track by id; the queue never owns or duplicates
/// track data. The same track may be queued multiple times, each occurrence
/// with its own slot id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Unique slot identifier, stable across reordering
    pub id: QueueItemId,

    /// Referenced catalog track
    pub track: TrackId,

    /// Sort key in play order; dense, always equal to the item's index
    pub position: u64,

    /// When the item was enqueued (informational)
    pub added_at: DateTime<Utc>,

    /// Enqueue context (informational)
    pub source: QueueSource,
}

impl QueueItem {
    /// Create a new queue item for a track
    pub fn new(track: TrackId, position: u64, source: QueueSource) -> Self {
        Self {
            id: QueueItemId::generate(),
            track,
            position,
            added_at: Utc::now(),
            source,
        }
    }
}

/// Enqueue context for a queue item
///
/// Records where a track was queued from. Informational only; persisted
/// alongside the item but never interpreted by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QueueSource {
    /// Queued directly by the user
    #[default]
    Manual,

    /// Queued from a playlist
    Playlist { id: String },

    /// Queued from an album
    Album { id: String },

    /// Queued from an artist's discography
    Artist { id: String },
}

impl QueueSource {
    /// Get the source kind as a string
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            QueueSource::Manual => "manual",
            QueueSource::Playlist { .. } => "playlist",
            QueueSource::Album { .. } => "album",
            QueueSource::Artist { .. } => "artist",
        }
    }

    /// Get the context identifier, if any
    #[must_use]
    pub fn context_id(&self) -> Option<&str> {
        match self {
            QueueSource::Manual => None,
            QueueSource::Playlist { id } | QueueSource::Album { id } | QueueSource::Artist { id } => {
                Some(id)
            }
        }
    }

    /// Rebuild from persisted kind/id parts
    ///
    /// Unknown kinds fall back to `Manual`.
    #[must_use]
    pub fn from_parts(kind: &str, id: Option<String>) -> Self {
        match (kind, id) {
            ("playlist", Some(id)) => QueueSource::Playlist { id },
            ("album", Some(id)) => QueueSource::Album { id },
            ("artist", Some(id)) => QueueSource::Artist { id },
            _ => QueueSource::Manual,
        }
    }
}

/// Result of a navigation operation
///
/// Distinguishes cursor movement from in-place restarts and the benign
/// end-of-queue/empty signals. Never an error: an empty or exhausted queue
/// is an expected state, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipOutcome {
    /// Cursor moved; the contained item is now current
    Moved(QueueItem),

    /// The current item restarts from the beginning; cursor unchanged
    Restart(QueueItem),

    /// Nothing further to play in this mode; playback stops
    EndOfQueue,

    /// Rewind at the first item; playback position is unchanged
    NoChange,

    /// The queue has no items ("nothing to play")
    QueueEmpty,
}

impl SkipOutcome {
    /// The item to render next, if the outcome selects one
    #[must_use]
    pub fn item(&self) -> Option<&QueueItem> {
        match self {
            SkipOutcome::Moved(item) | SkipOutcome::Restart(item) => Some(item),
            _ => None,
        }
    }
}

/// Configuration for a queue session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Rewind restarts the current item instead of moving the cursor when
    /// elapsed playback exceeds this threshold (default: 3 seconds)
    pub restart_threshold: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            repeat: RepeatMode::Off,
            restart_threshold: Duration::from_secs(3),
        }
    }
}
