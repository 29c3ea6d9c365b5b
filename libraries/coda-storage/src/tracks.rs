/// Track catalog persistence
use crate::database::Database;
use crate::error::{Result, StorageError};
use async_trait::async_trait;
use coda_core::{CodaError, Track, TrackCatalog, TrackId};
use sqlx::Row;
use std::path::Path;

impl Database {
    /// Add a track to the catalog
    ///
    /// # Errors
    /// Returns an error if a track with the same id already exists
    pub async fn add_track(&self, track: &Track) -> Result<()> {
        sqlx::query(
            "INSERT INTO tracks (id, title, artist, album, track_number, duration_ms, file_path, added_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(track.id.as_str())
        .bind(&track.title)
        .bind(&track.artist)
        .bind(&track.album)
        .bind(track.track_number.map(i64::from))
        .bind(track.duration_ms.map(|d| d as i64))
        .bind(track.file_path.to_string_lossy().to_string())
        .bind(track.added_at.timestamp())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get all catalog tracks ordered by title
    pub async fn all_tracks(&self) -> Result<Vec<Track>> {
        let rows = sqlx::query(
            "SELECT id, title, artist, album, track_number, duration_ms, file_path, added_at
             FROM tracks ORDER BY title",
        )
        .fetch_all(self.pool())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(Track {
                    id: TrackId::new(row.get::<String, _>("id")),
                    title: row.get("title"),
                    artist: row.get("artist"),
                    album: row.get("album"),
                    track_number: row.get::<Option<i64>, _>("track_number").map(|n| n as u32),
                    duration_ms: row.get::<Option<i64>, _>("duration_ms").map(|d| d as u64),
                    file_path: Path::new(&row.get::<String, _>("file_path")).to_path_buf(),
                    added_at: chrono::DateTime::from_timestamp(row.get::<i64, _>("added_at"), 0)
                        .ok_or_else(|| StorageError::Query("invalid timestamp".to_string()))?,
                })
            })
            .collect()
    }

    /// Delete a track from the catalog
    ///
    /// # Errors
    /// Returns `NotFound` if no track has the given id
    pub async fn delete_track(&self, id: &TrackId) -> Result<()> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Track", id.as_str()));
        }

        Ok(())
    }
}

#[async_trait]
impl TrackCatalog for Database {
    async fn get_track(&self, id: &TrackId) -> coda_core::Result<Track> {
        let row = sqlx::query(
            "SELECT id, title, artist, album, track_number, duration_ms, file_path, added_at
             FROM tracks WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CodaError::storage(e.to_string()))?
        .ok_or_else(|| CodaError::not_found("Track", id.as_str()))?;

        Ok(Track {
            id: TrackId::new(row.get::<String, _>("id")),
            title: row.get("title"),
            artist: row.get("artist"),
            album: row.get("album"),
            track_number: row.get::<Option<i64>, _>("track_number").map(|n| n as u32),
            duration_ms: row.get::<Option<i64>, _>("duration_ms").map(|d| d as u64),
            file_path: Path::new(&row.get::<String, _>("file_path")).to_path_buf(),
            added_at: chrono::DateTime::from_timestamp(row.get::<i64, _>("added_at"), 0)
                .ok_or_else(|| CodaError::storage("invalid timestamp"))?,
        })
    }
}
