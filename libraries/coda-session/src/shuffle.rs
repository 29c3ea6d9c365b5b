//! Shuffle permutation helper
//!
//! Uniform random shuffle (Fisher-Yates) over queue items. Cursor relocation
//! and the restore contract live in the session; this module only permutes.

use crate::types::QueueItem;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle items into a uniformly random permutation
///
/// Every permutation is equally likely. The caller renumbers positions and
/// relocates the cursor afterwards.
pub fn shuffle_items(items: &mut [QueueItem]) {
    let mut rng = thread_rng();
    items.shuffle(&mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueueSource;
    use coda_core::TrackId;
    use std::collections::HashSet;

    fn create_items(count: usize) -> Vec<QueueItem> {
        (0..count)
            .map(|i| {
                QueueItem::new(
                    TrackId::new(format!("track-{}", i)),
                    i as u64,
                    QueueSource::Manual,
                )
            })
            .collect()
    }

    #[test]
    fn shuffle_preserves_all_items() {
        let mut items = create_items(10);
        let original_ids: HashSet<_> = items.iter().map(|item| item.id.clone()).collect();

        shuffle_items(&mut items);

        let shuffled_ids: HashSet<_> = items.iter().map(|item| item.id.clone()).collect();
        assert_eq!(original_ids, shuffled_ids);
    }

    #[test]
    fn shuffle_changes_order() {
        let mut items = create_items(20);
        let original: Vec<_> = items.iter().map(|item| item.id.clone()).collect();

        shuffle_items(&mut items);

        let shuffled: Vec<_> = items.iter().map(|item| item.id.clone()).collect();

        // Identical order has probability 1/20!. If this ever fails it's
        // astronomical bad luck, not a bug.
        assert_ne!(original, shuffled);
    }

    #[test]
    fn shuffle_empty_and_single() {
        let mut items: Vec<QueueItem> = Vec::new();
        shuffle_items(&mut items);
        assert!(items.is_empty());

        let mut items = create_items(1);
        shuffle_items(&mut items);
        assert_eq!(items.len(), 1);
    }
}
