/// Queue session mirroring
use crate::database::Database;
use crate::error::{Result, StorageError};
use coda_core::{QueueItemId, RepeatMode, TrackId};
use coda_session::{QueueItem, QueueSource, SessionSnapshot};
use sqlx::Row;

impl Database {
    /// Write the whole session to the mirror in one transaction
    ///
    /// Delete-and-reinsert: the queue is small and the mirror is only read
    /// back at startup, so there is nothing to gain from diffing rows.
    pub async fn save_session(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let original_order = snapshot
            .original_order
            .as_ref()
            .map(|order| serde_json::to_string(order))
            .transpose()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM queue_items")
            .execute(&mut *tx)
            .await?;

        for item in &snapshot.items {
            sqlx::query(
                "INSERT INTO queue_items (id, track_id, position, added_at, source_type, source_id)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(item.id.as_str())
            .bind(item.track.as_str())
            .bind(item.position as i64)
            .bind(item.added_at.timestamp())
            .bind(item.source.kind())
            .bind(item.source.context_id())
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "INSERT INTO queue_state (id, current_index, shuffle_enabled, repeat_mode, original_order, updated_at)
             VALUES (1, ?, ?, ?, ?, ?)
             ON CONFLICT(id)
             DO UPDATE SET
                current_index = excluded.current_index,
                shuffle_enabled = excluded.shuffle_enabled,
                repeat_mode = excluded.repeat_mode,
                original_order = excluded.original_order,
                updated_at = excluded.updated_at",
        )
        .bind(snapshot.cursor.map(|index| index as i64))
        .bind(i64::from(snapshot.original_order.is_some()))
        .bind(snapshot.repeat.as_str())
        .bind(original_order)
        .bind(chrono::Utc::now().timestamp())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(items = snapshot.items.len(), "queue session mirrored");
        Ok(())
    }

    /// Load the mirrored session, if one was ever saved
    ///
    /// The returned snapshot is raw mirror data; rehydration sanitizes it.
    pub async fn load_session(&self) -> Result<Option<SessionSnapshot>> {
        let state = sqlx::query(
            "SELECT current_index, repeat_mode, original_order FROM queue_state WHERE id = 1",
        )
        .fetch_optional(self.pool())
        .await?;

        let Some(state) = state else {
            return Ok(None);
        };

        let rows = sqlx::query(
            "SELECT id, track_id, position, added_at, source_type, source_id
             FROM queue_items ORDER BY position",
        )
        .fetch_all(self.pool())
        .await?;

        let items = rows
            .iter()
            .map(|row| {
                Ok(QueueItem {
                    id: QueueItemId::new(row.get::<String, _>("id")),
                    track: TrackId::new(row.get::<String, _>("track_id")),
                    position: row.get::<i64, _>("position") as u64,
                    added_at: chrono::DateTime::from_timestamp(row.get::<i64, _>("added_at"), 0)
                        .ok_or_else(|| StorageError::Query("invalid timestamp".to_string()))?,
                    source: QueueSource::from_parts(
                        &row.get::<String, _>("source_type"),
                        row.get::<Option<String>, _>("source_id"),
                    ),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // A hand-edited negative index reads back as unset, not as some item.
        let cursor = state
            .get::<Option<i64>, _>("current_index")
            .and_then(|index| usize::try_from(index).ok());

        let repeat =
            RepeatMode::from_str(&state.get::<String, _>("repeat_mode")).unwrap_or(RepeatMode::Off);

        let original_order = state
            .get::<Option<String>, _>("original_order")
            .map(|json| serde_json::from_str::<Vec<QueueItemId>>(&json))
            .transpose()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        tracing::debug!(items = items.len(), "queue session loaded from mirror");

        Ok(Some(SessionSnapshot {
            items,
            cursor,
            original_order,
            repeat,
        }))
    }
}
