//! Serializable session snapshot
//!
//! The persistence mirror and rehydration path. `sanitize` repairs any
//! invalid combination a stale or hand-edited mirror could hold, so loading
//! can never produce a session that violates the queue invariants.

use coda_core::{QueueItemId, RepeatMode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::QueueItem;

/// Serializable capture of a queue session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Queue items in play order
    pub items: Vec<QueueItem>,

    /// Cursor index
    pub cursor: Option<usize>,

    /// Restore order, present while shuffled
    pub original_order: Option<Vec<QueueItemId>>,

    /// Repeat mode
    pub repeat: RepeatMode,
}

impl SessionSnapshot {
    /// Repair the snapshot into a state satisfying all queue invariants
    ///
    /// - duplicate item ids: first occurrence wins
    /// - items re-sorted by position, then renumbered densely
    /// - cursor clamped into bounds; unset when the queue is empty
    /// - restore order reconciled into a permutation of the surviving ids
    ///   (surviving entries keep their recorded order, missing ids are
    ///   appended in play order); dropped entirely when the queue is empty
    #[must_use]
    pub fn sanitize(mut self) -> Self {
        let mut seen = HashSet::new();
        self.items.retain(|item| seen.insert(item.id.clone()));

        self.items.sort_by_key(|item| item.position);
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index as u64;
        }

        self.cursor = match self.cursor {
            Some(_) if self.items.is_empty() => None,
            Some(cursor) => Some(cursor.min(self.items.len() - 1)),
            None => None,
        };

        let order = self.original_order.take();
        self.original_order = order.and_then(|order| {
            if self.items.is_empty() {
                return None;
            }
            let current: HashSet<QueueItemId> =
                self.items.iter().map(|item| item.id.clone()).collect();
            let mut listed = HashSet::new();
            let mut reconciled: Vec<QueueItemId> = Vec::with_capacity(self.items.len());
            for id in order {
                if current.contains(&id) && listed.insert(id.clone()) {
                    reconciled.push(id);
                }
            }
            for item in &self.items {
                if !listed.contains(&item.id) {
                    reconciled.push(item.id.clone());
                }
            }
            Some(reconciled)
        });

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueueSource;
    use coda_core::TrackId;

    fn item(id: &str, track: &str, position: u64) -> QueueItem {
        QueueItem {
            id: QueueItemId::new(id),
            track: TrackId::new(track),
            position,
            added_at: chrono::Utc::now(),
            source: QueueSource::Manual,
        }
    }

    #[test]
    fn sanitize_drops_duplicate_ids() {
        let snapshot = SessionSnapshot {
            items: vec![item("a", "1", 0), item("a", "2", 1), item("b", "3", 2)],
            cursor: None,
            original_order: None,
            repeat: RepeatMode::Off,
        };

        let clean = snapshot.sanitize();

        assert_eq!(clean.items.len(), 2);
        assert_eq!(clean.items[0].track.as_str(), "1", "first occurrence wins");
        assert_eq!(clean.items[1].track.as_str(), "3");
    }

    #[test]
    fn sanitize_resorts_by_position_and_renumbers() {
        let snapshot = SessionSnapshot {
            items: vec![item("c", "3", 9), item("a", "1", 2), item("b", "2", 5)],
            cursor: None,
            original_order: None,
            repeat: RepeatMode::Off,
        };

        let clean = snapshot.sanitize();

        let tracks: Vec<&str> = clean.items.iter().map(|i| i.track.as_str()).collect();
        assert_eq!(tracks, vec!["1", "2", "3"]);
        let positions: Vec<u64> = clean.items.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn sanitize_clamps_cursor() {
        let snapshot = SessionSnapshot {
            items: vec![item("a", "1", 0), item("b", "2", 1)],
            cursor: Some(7),
            original_order: None,
            repeat: RepeatMode::All,
        };

        let clean = snapshot.sanitize();
        assert_eq!(clean.cursor, Some(1));
    }

    #[test]
    fn sanitize_unsets_cursor_on_empty_queue() {
        let snapshot = SessionSnapshot {
            items: Vec::new(),
            cursor: Some(0),
            original_order: Some(vec![QueueItemId::new("stale")]),
            repeat: RepeatMode::One,
        };

        let clean = snapshot.sanitize();
        assert_eq!(clean.cursor, None);
        assert_eq!(clean.original_order, None);
        assert_eq!(clean.repeat, RepeatMode::One, "repeat survives");
    }

    #[test]
    fn sanitize_reconciles_original_order() {
        let snapshot = SessionSnapshot {
            items: vec![item("b", "2", 0), item("c", "3", 1), item("d", "4", 2)],
            cursor: Some(0),
            // "a" no longer exists; "d" is missing from the recorded order
            original_order: Some(vec![
                QueueItemId::new("a"),
                QueueItemId::new("c"),
                QueueItemId::new("b"),
            ]),
            repeat: RepeatMode::Off,
        };

        let clean = snapshot.sanitize();

        assert_eq!(
            clean.original_order,
            Some(vec![
                QueueItemId::new("c"),
                QueueItemId::new("b"),
                QueueItemId::new("d"),
            ])
        );
    }

    #[test]
    fn sanitize_keeps_valid_snapshot_unchanged() {
        let snapshot = SessionSnapshot {
            items: vec![item("a", "1", 0), item("b", "2", 1)],
            cursor: Some(1),
            original_order: Some(vec![QueueItemId::new("b"), QueueItemId::new("a")]),
            repeat: RepeatMode::All,
        };

        let clean = snapshot.clone().sanitize();
        assert_eq!(clean, snapshot);
    }
}
