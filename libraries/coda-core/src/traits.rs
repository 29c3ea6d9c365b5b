/// Core traits for Coda Player
use crate::error::{CodaError, Result};
use crate::types::{Track, TrackId};
use async_trait::async_trait;

/// Track catalog trait
///
/// The queue stores track references only; resolving a reference to full
/// track metadata goes through this trait. Implementations may be backed by
/// a local database or a remote API.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Resolve a track reference to its full metadata
    ///
    /// # Errors
    /// Returns `CodaError::NotFound` if no track exists for the ID
    async fn get_track(&self, id: &TrackId) -> Result<Track>;

    /// Resolve a batch of track references
    ///
    /// Unknown IDs are skipped rather than failing the whole batch, so the
    /// result may be shorter than the input.
    async fn get_tracks(&self, ids: &[TrackId]) -> Result<Vec<Track>> {
        let mut tracks = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get_track(id).await {
                Ok(track) => tracks.push(track),
                Err(CodaError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(tracks)
    }
}
