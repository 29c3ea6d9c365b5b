//! Queue store
//!
//! Ordered queue items plus the playback cursor. Provides primitive,
//! order-preserving mutations, each of which leaves three invariants intact:
//! - item ids are unique within the queue
//! - the cursor is unset or a valid index
//! - positions are dense and equal to each item's index
//!
//! Shuffle and repeat are session concerns; the store only maintains the
//! original-order bookkeeping that keeps the restore contract satisfiable
//! while items are added or removed during shuffle.

use coda_core::{QueueItemId, TrackId};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{Result, SessionError};
use crate::types::{QueueItem, QueueSource};

/// Ordered queue of track references with a playback cursor
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    /// Queued items in play order
    items: Vec<QueueItem>,

    /// Index of the currently active item
    cursor: Option<usize>,

    /// Restore order captured when shuffle was enabled; present exactly
    /// while shuffled, always a permutation of the ids in `items`
    original_order: Option<Vec<QueueItemId>>,
}

impl QueueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Mutations =====

    /// Append a track to the end of the queue
    pub fn append(&mut self, track: TrackId, source: QueueSource) -> QueueItem {
        let item = QueueItem::new(track, self.items.len() as u64, source);
        self.track_addition(&item.id);
        self.items.push(item.clone());
        item
    }

    /// Append several tracks, preserving their order
    pub fn append_many(&mut self, tracks: Vec<TrackId>, source: QueueSource) -> Vec<QueueItem> {
        tracks
            .into_iter()
            .map(|track| self.append(track, source.clone()))
            .collect()
    }

    /// Replace the whole queue with a new play context
    ///
    /// Equivalent to `clear` followed by a bulk append.
    pub fn replace(&mut self, tracks: Vec<TrackId>, source: QueueSource) -> Vec<QueueItem> {
        self.clear();
        self.append_many(tracks, source)
    }

    /// Insert a track immediately after the cursor ("play next")
    ///
    /// On an empty queue this appends with the cursor left unset. With the
    /// cursor unset on a non-empty queue the item goes to the front: nothing
    /// is playing yet, so "next" is the head of the queue.
    pub fn insert_after_cursor(&mut self, track: TrackId, source: QueueSource) -> QueueItem {
        let index = match self.cursor {
            Some(cursor) => cursor + 1,
            None => 0,
        };
        let item = QueueItem::new(track, index as u64, source);
        self.track_addition(&item.id);
        self.items.insert(index, item.clone());
        self.renumber();
        item
    }

    /// Remove an item by id
    ///
    /// Cursor adjustment: removing an item before the cursor shifts the
    /// cursor down so it keeps pointing at the same logical item; removing
    /// the cursor item leaves the cursor at the same index (now the item
    /// that followed), clamped to the last index at the end of the queue;
    /// removing the only item unsets the cursor.
    pub fn remove(&mut self, id: &QueueItemId) -> Result<QueueItem> {
        let index = self
            .index_of(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        let item = self.items.remove(index);
        self.track_removal(id);

        if let Some(cursor) = self.cursor {
            match index.cmp(&cursor) {
                Ordering::Less => self.cursor = Some(cursor - 1),
                Ordering::Equal => {
                    if self.items.is_empty() {
                        self.cursor = None;
                    } else {
                        self.cursor = Some(cursor.min(self.items.len() - 1));
                    }
                }
                Ordering::Greater => {}
            }
        }

        self.renumber();
        Ok(item)
    }

    /// Move an item to a new index
    ///
    /// The cursor continues pointing at the same logical item it pointed to
    /// before the move.
    pub fn move_item(&mut self, id: &QueueItemId, to_index: usize) -> Result<()> {
        let from_index = self
            .index_of(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        if to_index >= self.items.len() {
            return Err(SessionError::OutOfRange {
                index: to_index,
                len: self.items.len(),
            });
        }

        if from_index == to_index {
            return Ok(());
        }

        // Remember the cursor item so it can be relocated after the reorder
        let cursor_id = self.current().map(|item| item.id.clone());

        let item = self.items.remove(from_index);
        self.items.insert(to_index, item);

        if let Some(cursor_id) = cursor_id {
            self.cursor = self.index_of(&cursor_id);
        }

        self.renumber();
        Ok(())
    }

    /// Empty the queue, unset the cursor, and drop the restore order
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = None;
        self.original_order = None;
    }

    /// Point the cursor at a specific queue position
    pub fn set_cursor(&mut self, index: usize) -> Result<()> {
        if self.items.is_empty() {
            return Err(SessionError::EmptyQueue);
        }
        if index >= self.items.len() {
            return Err(SessionError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.cursor = Some(index);
        Ok(())
    }

    // ===== Queries =====

    /// All queued items in play order
    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    /// Current cursor index
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The item at the cursor
    pub fn current(&self) -> Option<&QueueItem> {
        self.cursor.and_then(|cursor| self.items.get(cursor))
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if a restore order is active (queue currently shuffled)
    pub fn is_shuffled(&self) -> bool {
        self.original_order.is_some()
    }

    /// Look up an item by id
    pub fn get(&self, id: &QueueItemId) -> Option<&QueueItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Index of an item by id
    pub fn index_of(&self, id: &QueueItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Up to `limit` items after the cursor, in play order
    ///
    /// With the cursor unset the whole queue is upcoming.
    pub fn upcoming(&self, limit: usize) -> &[QueueItem] {
        let start = match self.cursor {
            Some(cursor) => cursor + 1,
            None => 0,
        };
        let start = start.min(self.items.len());
        let end = start.saturating_add(limit).min(self.items.len());
        &self.items[start..end]
    }

    /// Up to `limit` items before the cursor, in play order
    ///
    /// Empty when the cursor is unset.
    pub fn recent(&self, limit: usize) -> &[QueueItem] {
        match self.cursor {
            Some(cursor) => {
                let end = cursor.min(self.items.len());
                let start = end.saturating_sub(limit);
                &self.items[start..end]
            }
            None => &[],
        }
    }

    /// Restore-order view (for snapshots)
    pub fn original_order(&self) -> Option<&[QueueItemId]> {
        self.original_order.as_deref()
    }

    // ===== Shuffle bookkeeping (session-driven) =====

    /// Snapshot the current play order as the restore target
    pub(crate) fn capture_original_order(&mut self) {
        self.original_order = Some(self.items.iter().map(|item| item.id.clone()).collect());
    }

    /// Reorder items back to the captured restore order and drop it
    ///
    /// Stable for ids missing from the captured order (they sort to the end
    /// in their current relative order), though the addition/removal
    /// bookkeeping keeps the order complete in practice.
    pub(crate) fn restore_original_order(&mut self) {
        if let Some(order) = self.original_order.take() {
            let rank: HashMap<&QueueItemId, usize> = order
                .iter()
                .enumerate()
                .map(|(index, id)| (id, index))
                .collect();
            self.items
                .sort_by_key(|item| rank.get(&item.id).copied().unwrap_or(usize::MAX));
        }
        self.renumber();
    }

    /// Mutable access to the items for in-place reordering
    pub(crate) fn items_mut(&mut self) -> &mut [QueueItem] {
        &mut self.items
    }

    /// Re-point the cursor at a specific item after a reorder
    pub(crate) fn relocate_cursor(&mut self, id: &QueueItemId) {
        self.cursor = self.index_of(id);
    }

    /// Set the cursor and return the selected item (session navigation)
    pub(crate) fn seek(&mut self, index: usize) -> Option<QueueItem> {
        let item = self.items.get(index).cloned()?;
        self.cursor = Some(index);
        Some(item)
    }

    /// Reassign dense positions after the item order changed
    pub(crate) fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index as u64;
        }
    }

    /// Construct a store from validated parts (snapshot rehydration)
    pub(crate) fn from_parts(
        items: Vec<QueueItem>,
        cursor: Option<usize>,
        original_order: Option<Vec<QueueItemId>>,
    ) -> Self {
        Self {
            items,
            cursor,
            original_order,
        }
    }

    // original_order maintenance while shuffled

    fn track_addition(&mut self, id: &QueueItemId) {
        if let Some(order) = self.original_order.as_mut() {
            order.push(id.clone());
        }
    }

    fn track_removal(&mut self, id: &QueueItemId) {
        if let Some(order) = self.original_order.as_mut() {
            order.retain(|existing| existing != id);
        }
    }
}
