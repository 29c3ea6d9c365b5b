//! Coda Player Storage
//!
//! `SQLite` persistence for Coda Player: the track catalog and a durable
//! mirror of the queue session.
//!
//! # Architecture
//!
//! - **Embedded migrations**: the schema ships in the binary and is applied
//!   on open; no external migration step
//! - **Advisory mirror**: the queue tables are a crash-recovery mirror of
//!   the in-memory session, never the source of truth
//! - **Runtime queries**: plain `sqlx` runtime API, no compile-time database
//!   required to build
//!
//! # Example
//!
//! ```rust,no_run
//! use coda_storage::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://coda.db").await?;
//!
//! // Restore the previous session, if one was mirrored
//! if let Some(snapshot) = db.load_session().await? {
//!     println!("restoring {} queued tracks", snapshot.items.len());
//! }
//! # Ok(())
//! # }
//! ```

mod database;
mod error;

mod queue_state;
mod tracks;

pub use database::Database;
pub use error::{Result, StorageError};
