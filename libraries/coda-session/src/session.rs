//! Queue session controller
//!
//! Decides what plays next or previous under the active shuffle/repeat
//! modes, manages the mode transitions including the order-restoration
//! contract, and buffers events for the owner. All queue mutations flow
//! through here so every change is observable in one place.

use coda_core::{QueueItemId, RepeatMode, TrackId};
use std::time::Duration;

use crate::error::{Result, SessionError};
use crate::events::SessionEvent;
use crate::shuffle;
use crate::snapshot::SessionSnapshot;
use crate::store::QueueStore;
use crate::types::{QueueItem, QueueSource, SessionConfig, SkipOutcome};

/// Queue session state machine
///
/// Owns the queue store and the playback modes. Pure state: no I/O, no
/// locks, no UI framework dependency; a single owner serializes access and
/// an external playback surface renders the audio.
///
/// Navigation is total on a non-empty queue: every outcome, including
/// running off the end, is a [`SkipOutcome`] rather than an error.
pub struct QueueSession {
    // Queue state
    store: QueueStore,

    // Settings
    repeat: RepeatMode,
    restart_threshold: Duration,

    // Event queue for owner synchronization
    pending_events: Vec<SessionEvent>,
}

impl QueueSession {
    /// Create an empty session
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: QueueStore::new(),
            repeat: config.repeat,
            restart_threshold: config.restart_threshold,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue Mutations =====

    /// Add a track to the end of the queue
    pub fn append(&mut self, track: TrackId, source: QueueSource) -> QueueItem {
        let item = self.store.append(track, source);
        self.emit_queue_changed();
        item
    }

    /// Add several tracks to the end of the queue
    pub fn append_many(&mut self, tracks: Vec<TrackId>, source: QueueSource) -> Vec<QueueItem> {
        if tracks.is_empty() {
            return Vec::new();
        }
        let items = self.store.append_many(tracks, source);
        self.emit_queue_changed();
        items
    }

    /// Insert a track right after the current item ("play next")
    pub fn insert_after_cursor(&mut self, track: TrackId, source: QueueSource) -> QueueItem {
        let item = self.store.insert_after_cursor(track, source);
        self.emit_queue_changed();
        item
    }

    /// Replace the queue with a new play context (play album / play playlist)
    pub fn replace(&mut self, tracks: Vec<TrackId>, source: QueueSource) -> Vec<QueueItem> {
        let items = self.store.replace(tracks, source);
        self.emit_queue_changed();
        items
    }

    /// Remove an item from the queue
    ///
    /// Removing the current item moves playback to the item that slides into
    /// its index (or the new last item at the end of the queue).
    pub fn remove(&mut self, id: &QueueItemId) -> Result<QueueItem> {
        let previous_track = self.store.current().map(|item| item.track.clone());
        let removed_current = self.store.current().map(|item| &item.id) == Some(id);

        let removed = self.store.remove(id)?;
        self.emit_queue_changed();

        // The cursor landed on a different item
        if removed_current {
            if let Some(item) = self.store.current().cloned() {
                self.emit_track_changed(item.id, item.track, previous_track);
            }
        }
        Ok(removed)
    }

    /// Move an item to a new index
    pub fn move_item(&mut self, id: &QueueItemId, to_index: usize) -> Result<()> {
        self.store.move_item(id, to_index)?;
        self.emit_queue_changed();
        Ok(())
    }

    /// Clear the queue
    pub fn clear(&mut self) {
        self.store.clear();
        self.emit_queue_changed();
    }

    // ===== Navigation =====

    /// Advance to the next item
    ///
    /// With repeat-one the current item restarts instead, unless `force` is
    /// set: that is the caller's explicit real-skip override. At the end of
    /// the queue, repeat-all wraps to the start; otherwise playback stops
    /// with the cursor left on the last item.
    pub fn skip_forward(&mut self, force: bool) -> SkipOutcome {
        if self.store.is_empty() {
            return SkipOutcome::QueueEmpty;
        }

        let Some(cursor) = self.store.cursor() else {
            // Nothing has started yet, playback begins at the head
            return self.move_cursor(0);
        };

        if self.repeat == RepeatMode::One && !force {
            if let Some(item) = self.store.current() {
                return SkipOutcome::Restart(item.clone());
            }
        }

        if cursor + 1 < self.store.len() {
            return self.move_cursor(cursor + 1);
        }

        if self.repeat == RepeatMode::All {
            // Wrap to the start of the queue
            return self.move_cursor(0);
        }

        // Cursor stays on the last item; redundant calls repeat this signal
        self.emit_end_of_queue();
        SkipOutcome::EndOfQueue
    }

    /// Natural end-of-track signal from the playback surface
    ///
    /// Equivalent to a non-forced forward skip, so repeat-one replays the
    /// finished item.
    pub fn track_finished(&mut self) -> SkipOutcome {
        self.skip_forward(false)
    }

    /// Step back to the previous item
    ///
    /// `elapsed` is how far playback is into the current item; past the
    /// restart threshold the current item restarts instead of the cursor
    /// moving. At the first item the call is a no-op: rewind never wraps,
    /// regardless of repeat mode.
    pub fn skip_backward(&mut self, elapsed: Duration) -> SkipOutcome {
        if self.store.is_empty() {
            return SkipOutcome::QueueEmpty;
        }

        let Some(cursor) = self.store.cursor() else {
            return SkipOutcome::NoChange;
        };

        if elapsed > self.restart_threshold {
            if let Some(item) = self.store.current() {
                return SkipOutcome::Restart(item.clone());
            }
        }

        if cursor > 0 {
            return self.move_cursor(cursor - 1);
        }

        SkipOutcome::NoChange
    }

    /// Start playback at a specific queue position
    ///
    /// An empty queue is benign (`Ok(QueueEmpty)`); an invalid index on a
    /// non-empty queue is a hard error.
    pub fn play_at(&mut self, index: usize) -> Result<SkipOutcome> {
        if self.store.is_empty() {
            return Ok(SkipOutcome::QueueEmpty);
        }
        if index >= self.store.len() {
            return Err(SessionError::OutOfRange {
                index,
                len: self.store.len(),
            });
        }
        Ok(self.move_cursor(index))
    }

    // ===== Shuffle & Repeat =====

    /// Shuffle the queue into a uniformly random permutation
    ///
    /// Captures the current order for later restoration. The current item
    /// keeps its identity at whatever index the permutation places it, and
    /// the cursor follows it there. No-op when already shuffled or when the
    /// queue is empty.
    pub fn enable_shuffle(&mut self) {
        if self.store.is_shuffled() || self.store.is_empty() {
            return;
        }

        let current = self.store.current().map(|item| item.id.clone());

        self.store.capture_original_order();
        shuffle::shuffle_items(self.store.items_mut());
        self.store.renumber();
        if let Some(id) = current {
            self.store.relocate_cursor(&id);
        }

        self.emit_shuffle_changed(true);
        self.emit_queue_changed();
    }

    /// Restore the order from before shuffle was enabled
    ///
    /// Items added while shuffled end up appended in insertion order; items
    /// removed while shuffled are simply absent; the cursor follows the
    /// current item. No-op when not shuffled.
    pub fn disable_shuffle(&mut self) {
        if !self.store.is_shuffled() {
            return;
        }

        let current = self.store.current().map(|item| item.id.clone());

        self.store.restore_original_order();
        if let Some(id) = current {
            self.store.relocate_cursor(&id);
        }

        self.emit_shuffle_changed(false);
        self.emit_queue_changed();
    }

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, enabled: bool) {
        if enabled {
            self.enable_shuffle();
        } else {
            self.disable_shuffle();
        }
    }

    /// Advance the repeat mode through off -> all -> one -> off
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.set_repeat(self.repeat.cycle());
        self.repeat
    }

    /// Set the repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.repeat != mode {
            self.repeat = mode;
            self.emit_repeat_changed();
        }
    }

    // ===== State Queries =====

    /// Read access to the underlying store
    pub fn store(&self) -> &QueueStore {
        &self.store
    }

    /// The currently active item
    pub fn current(&self) -> Option<&QueueItem> {
        self.store.current()
    }

    /// Current cursor index
    pub fn cursor(&self) -> Option<usize> {
        self.store.cursor()
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Whether the queue is currently shuffled
    pub fn is_shuffled(&self) -> bool {
        self.store.is_shuffled()
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// All queued items in play order
    pub fn items(&self) -> &[QueueItem] {
        self.store.items()
    }

    /// Up to `limit` items after the cursor
    pub fn upcoming(&self, limit: usize) -> &[QueueItem] {
        self.store.upcoming(limit)
    }

    /// Up to `limit` items before the cursor, in play order
    pub fn recent(&self, limit: usize) -> &[QueueItem] {
        self.store.recent(limit)
    }

    // ===== Snapshot =====

    /// Capture the session for persistence
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            items: self.store.items().to_vec(),
            cursor: self.store.cursor(),
            original_order: self.store.original_order().map(|order| order.to_vec()),
            repeat: self.repeat,
        }
    }

    /// Rebuild a session from a persisted snapshot
    ///
    /// The snapshot is sanitized first, so a stale or corrupt mirror always
    /// rehydrates into a valid session. The snapshot's repeat mode wins over
    /// the config's initial mode.
    pub fn from_snapshot(snapshot: SessionSnapshot, config: SessionConfig) -> Self {
        let snapshot = snapshot.sanitize();
        let store =
            QueueStore::from_parts(snapshot.items, snapshot.cursor, snapshot.original_order);
        Self {
            store,
            repeat: snapshot.repeat,
            restart_threshold: config.restart_threshold,
            pending_events: Vec::new(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Call after operations to collect events for broadcast.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Move the cursor and report the newly current item
    fn move_cursor(&mut self, index: usize) -> SkipOutcome {
        let previous = self.store.current().map(|item| item.track.clone());
        match self.store.seek(index) {
            Some(item) => {
                self.emit_track_changed(item.id.clone(), item.track.clone(), previous);
                SkipOutcome::Moved(item)
            }
            None => SkipOutcome::QueueEmpty,
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(SessionEvent::QueueChanged {
            length: self.store.len(),
        });
    }

    fn emit_track_changed(
        &mut self,
        item_id: QueueItemId,
        track: TrackId,
        previous: Option<TrackId>,
    ) {
        self.pending_events.push(SessionEvent::TrackChanged {
            item_id,
            track,
            previous,
        });
    }

    fn emit_repeat_changed(&mut self) {
        self.pending_events
            .push(SessionEvent::RepeatChanged { mode: self.repeat });
    }

    fn emit_shuffle_changed(&mut self, enabled: bool) {
        self.pending_events
            .push(SessionEvent::ShuffleChanged { enabled });
    }

    fn emit_end_of_queue(&mut self) {
        self.pending_events.push(SessionEvent::EndOfQueue);
    }
}

impl Default for QueueSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
