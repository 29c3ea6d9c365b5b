//! Session Events
//!
//! Event-based communication for owner/UI synchronization. Events are
//! buffered by the session and drained by the owner after each operation:
//! - Structural queue changes (add/remove/reorder/replace/clear)
//! - Cursor landing on a different item
//! - Mode changes (repeat, shuffle)
//! - Forward advance exhausting the queue

use coda_core::{QueueItemId, RepeatMode, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the queue session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Queue contents changed (items added/removed/reordered/replaced)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Cursor moved to a different item
    TrackChanged {
        /// Slot id of the new current item
        item_id: QueueItemId,
        /// Track that is now current
        track: TrackId,
        /// Track that was current before (if any)
        previous: Option<TrackId>,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// The new repeat mode
        mode: RepeatMode,
    },

    /// Shuffle was enabled or disabled
    ShuffleChanged {
        /// Whether the queue is now shuffled
        enabled: bool,
    },

    /// Forward advance ran past the last item with repeat off
    EndOfQueue,
}
