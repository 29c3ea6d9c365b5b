//! Coda Player - Player Facade
//!
//! The ownership and concurrency shell around the queue session. This crate
//! provides:
//!
//! - **`Player`**: one session behind a `tokio` write lock, exposed as an
//!   async API safe to share across tasks
//! - **Event broadcasting**: session events re-broadcast on a `tokio`
//!   broadcast channel for any number of subscribers
//! - **View resolution**: now-playing, upcoming, and overview queries
//!   resolved against the track catalog
//! - **Mirroring**: every mutation mirrored to storage fire-and-forget, plus
//!   an awaitable `sync_now` for shutdown
//!
//! # Example
//!
//! ```rust,no_run
//! use coda_core::TrackId;
//! use coda_player::Player;
//! use coda_session::{QueueSource, SessionConfig};
//! use coda_storage::Database;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Arc::new(Database::new("sqlite://coda.db").await?);
//!
//! // Resume whatever was queued last run
//! let player = Player::restore(db.clone(), db, SessionConfig::default()).await;
//!
//! let mut events = player.subscribe();
//! player.append(TrackId::new("track-1"), QueueSource::Manual).await;
//! player.skip_forward(false).await;
//!
//! while let Ok(event) = events.try_recv() {
//!     println!("session event: {event:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod player;

pub use error::{PlayerError, Result};
pub use player::{NowPlaying, Player, QueueOverview};
