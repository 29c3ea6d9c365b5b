//! Async player facade
//!
//! Owns the queue session behind a write lock, broadcasts its events,
//! resolves display views through the track catalog, and mirrors every
//! mutation to storage without blocking the caller.

use coda_core::{CodaError, QueueItemId, RepeatMode, Track, TrackCatalog, TrackId};
use coda_session::{
    QueueItem, QueueSession, QueueSource, SessionConfig, SessionEvent, SessionSnapshot, SkipOutcome,
};
use coda_storage::Database;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

use crate::error::Result;

/// The current item together with its resolved catalog track
#[derive(Debug, Clone)]
pub struct NowPlaying {
    /// Queue slot being played
    pub item: QueueItem,
    /// Resolved catalog record
    pub track: Track,
}

/// Aggregate queue view for display
#[derive(Debug, Clone, Serialize)]
pub struct QueueOverview {
    /// Number of queued items
    pub total_items: usize,
    /// Index of the current item, if playback has started
    pub current_index: Option<usize>,
    /// Whether the queue is shuffled
    pub is_shuffled: bool,
    /// Active repeat mode
    pub repeat: RepeatMode,
    /// Sum of the known durations of all queued tracks
    pub total_duration: Duration,
}

/// Async facade over one queue session
///
/// All mutations run under a single write-lock acquisition, so concurrent
/// readers observe pre- or post-mutation state, never an intermediate one.
/// The lock is never held across I/O: catalog resolution and mirror writes
/// happen after it is released, and mirror failures only ever cost the
/// mirror, never the in-memory session.
pub struct Player {
    session: RwLock<QueueSession>,
    catalog: Arc<dyn TrackCatalog>,
    store: Option<Arc<Database>>,

    event_tx: broadcast::Sender<SessionEvent>,
    // Keeps the channel alive while no subscriber is attached
    _event_rx: broadcast::Receiver<SessionEvent>,
}

impl Player {
    /// Create a player with an empty session
    ///
    /// `store` is optional: without it the player runs purely in memory.
    pub fn new(
        catalog: Arc<dyn TrackCatalog>,
        store: Option<Arc<Database>>,
        config: SessionConfig,
    ) -> Self {
        let (event_tx, event_rx) = broadcast::channel(20);
        Self {
            session: RwLock::new(QueueSession::new(config)),
            catalog,
            store,
            event_tx,
            _event_rx: event_rx,
        }
    }

    /// Create a player, resuming the previous session from the mirror
    ///
    /// The mirror is advisory: a missing or unreadable mirror logs a warning
    /// and starts an empty session instead of failing startup.
    pub async fn restore(
        catalog: Arc<dyn TrackCatalog>,
        store: Arc<Database>,
        config: SessionConfig,
    ) -> Self {
        let session = match store.load_session().await {
            Ok(Some(snapshot)) => {
                debug!(items = snapshot.items.len(), "resuming mirrored session");
                QueueSession::from_snapshot(snapshot, config)
            }
            Ok(None) => QueueSession::new(config),
            Err(e) => {
                warn!(error = %e, "could not read session mirror, starting empty");
                QueueSession::new(config)
            }
        };

        let (event_tx, event_rx) = broadcast::channel(20);
        Self {
            session: RwLock::new(session),
            catalog,
            store: Some(store),
            event_tx,
            _event_rx: event_rx,
        }
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    // ===== Queue Mutations =====

    /// Add a track to the end of the queue
    pub async fn append(&self, track: TrackId, source: QueueSource) -> QueueItem {
        self.apply(|session| session.append(track, source)).await
    }

    /// Add several tracks to the end of the queue
    pub async fn append_many(&self, tracks: Vec<TrackId>, source: QueueSource) -> Vec<QueueItem> {
        self.apply(|session| session.append_many(tracks, source))
            .await
    }

    /// Insert a track right after the current item ("play next")
    pub async fn play_next(&self, track: TrackId, source: QueueSource) -> QueueItem {
        self.apply(|session| session.insert_after_cursor(track, source))
            .await
    }

    /// Replace the queue with a new play context
    pub async fn replace(&self, tracks: Vec<TrackId>, source: QueueSource) -> Vec<QueueItem> {
        self.apply(|session| session.replace(tracks, source)).await
    }

    /// Remove an item from the queue
    pub async fn remove(&self, id: &QueueItemId) -> Result<QueueItem> {
        let removed = self.apply(|session| session.remove(id)).await?;
        Ok(removed)
    }

    /// Move an item to a new index
    pub async fn move_item(&self, id: &QueueItemId, to_index: usize) -> Result<()> {
        self.apply(|session| session.move_item(id, to_index)).await?;
        Ok(())
    }

    /// Clear the queue
    pub async fn clear(&self) {
        self.apply(QueueSession::clear).await;
    }

    // ===== Navigation =====

    /// Advance to the next item
    pub async fn skip_forward(&self, force: bool) -> SkipOutcome {
        self.apply(|session| session.skip_forward(force)).await
    }

    /// Step back to the previous item, or restart the current one
    pub async fn skip_backward(&self, elapsed: Duration) -> SkipOutcome {
        self.apply(|session| session.skip_backward(elapsed)).await
    }

    /// Natural end-of-track signal from the playback surface
    pub async fn track_finished(&self) -> SkipOutcome {
        self.apply(QueueSession::track_finished).await
    }

    /// Start playback at a specific queue position
    pub async fn play_at(&self, index: usize) -> Result<SkipOutcome> {
        let outcome = self.apply(|session| session.play_at(index)).await?;
        Ok(outcome)
    }

    // ===== Shuffle & Repeat =====

    /// Enable or disable shuffle
    pub async fn set_shuffle(&self, enabled: bool) {
        self.apply(|session| session.set_shuffle(enabled)).await;
    }

    /// Advance the repeat mode through off -> all -> one -> off
    pub async fn cycle_repeat(&self) -> RepeatMode {
        self.apply(QueueSession::cycle_repeat).await
    }

    /// Set the repeat mode
    pub async fn set_repeat(&self, mode: RepeatMode) {
        self.apply(|session| session.set_repeat(mode)).await;
    }

    // ===== Views =====

    /// The current item with its resolved track
    ///
    /// Returns `None` when nothing is playing, and also when the catalog no
    /// longer knows the referenced track (a stale mirror entry).
    pub async fn now_playing(&self) -> Result<Option<NowPlaying>> {
        let item = {
            let session = self.session.read().await;
            session.current().cloned()
        };
        let Some(item) = item else {
            return Ok(None);
        };

        match self.catalog.get_track(&item.track).await {
            Ok(track) => Ok(Some(NowPlaying { item, track })),
            Err(CodaError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolved tracks for up to `limit` upcoming items
    ///
    /// References the catalog has lost are skipped.
    pub async fn upcoming(&self, limit: usize) -> Result<Vec<Track>> {
        let ids: Vec<TrackId> = {
            let session = self.session.read().await;
            session.upcoming(limit).iter().map(|i| i.track.clone()).collect()
        };
        let tracks = self.catalog.get_tracks(&ids).await?;
        Ok(tracks)
    }

    /// Aggregate queue view for display
    pub async fn overview(&self) -> Result<QueueOverview> {
        let (ids, current_index, is_shuffled, repeat, total_items) = {
            let session = self.session.read().await;
            let ids: Vec<TrackId> = session.items().iter().map(|i| i.track.clone()).collect();
            (
                ids,
                session.cursor(),
                session.is_shuffled(),
                session.repeat(),
                session.len(),
            )
        };

        let tracks = self.catalog.get_tracks(&ids).await?;
        let total_duration: Duration = tracks.iter().filter_map(Track::duration).sum();

        Ok(QueueOverview {
            total_items,
            current_index,
            is_shuffled,
            repeat,
            total_duration,
        })
    }

    /// All queued items in play order
    pub async fn queue(&self) -> Vec<QueueItem> {
        self.session.read().await.items().to_vec()
    }

    /// Number of queued items
    pub async fn queue_len(&self) -> usize {
        self.session.read().await.len()
    }

    /// Active repeat mode
    pub async fn repeat(&self) -> RepeatMode {
        self.session.read().await.repeat()
    }

    /// Whether the queue is currently shuffled
    pub async fn is_shuffled(&self) -> bool {
        self.session.read().await.is_shuffled()
    }

    // ===== Persistence =====

    /// Write the current session to the mirror and wait for the result
    ///
    /// The per-mutation mirroring is fire-and-forget; call this on shutdown
    /// when the write must be known to have landed.
    pub async fn sync_now(&self) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let snapshot = {
            let session = self.session.read().await;
            session.snapshot()
        };
        store.save_session(&snapshot).await?;
        Ok(())
    }

    /// Run a mutation under the write lock, then broadcast its events and
    /// mirror the new state
    ///
    /// The snapshot is taken while still holding the lock, so the mirror
    /// always receives the state the events describe.
    async fn apply<T>(&self, mutate: impl FnOnce(&mut QueueSession) -> T) -> T {
        let mut session = self.session.write().await;
        let result = mutate(&mut session);
        let events = session.drain_events();
        let snapshot = if self.store.is_some() && !events.is_empty() {
            Some(session.snapshot())
        } else {
            None
        };
        drop(session);

        for event in events {
            let _ = self.event_tx.send(event);
        }

        if let Some(snapshot) = snapshot {
            self.mirror(snapshot);
        }

        result
    }

    /// Fire-and-forget mirror write
    fn mirror(&self, snapshot: SessionSnapshot) {
        let Some(store) = self.store.clone() else {
            return;
        };
        tokio::spawn(async move {
            if let Err(e) = store.save_session(&snapshot).await {
                warn!(error = %e, "queue mirror write failed, in-memory session unaffected");
            }
        });
    }
}
