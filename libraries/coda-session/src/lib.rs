//! Coda Player - Queue & Session Management
//!
//! Platform-agnostic queue and session state machine. This crate provides:
//!
//! - **Queue store**: ordered queue items with stable identities, cursor
//!   tracking, and position bookkeeping
//! - **Session controller**: skip/previous/jump navigation under shuffle and
//!   repeat modes, with restart-vs-previous handling
//! - **Shuffle**: uniform random permutation with original-order restoration
//! - **Snapshots**: serializable session state for persistence and restore
//! - **Events**: buffered state-change notifications for the owning layer
//!
//! ## Architecture
//!
//! Everything here is synchronous, in-memory state. There is no I/O, no
//! async, and no locking; a single owner (typically the player facade)
//! serializes access and forwards events. Persistence lives in
//! `coda-storage`, which consumes [`SessionSnapshot`] without this crate
//! knowing about it.
//!
//! ## Example
//!
//! ```rust
//! use coda_core::TrackId;
//! use coda_session::{QueueSession, QueueSource, SkipOutcome};
//!
//! let mut session = QueueSession::default();
//! session.append(TrackId::new("track-1"), QueueSource::Manual);
//! session.append(TrackId::new("track-2"), QueueSource::Manual);
//!
//! // Nothing is playing yet, so the first skip starts at the head
//! match session.skip_forward(false) {
//!     SkipOutcome::Moved(item) => assert_eq!(item.track.as_str(), "track-1"),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//!
//! // "Play next" lands right after the current item
//! session.insert_after_cursor(TrackId::new("track-3"), QueueSource::Manual);
//! assert_eq!(session.items()[1].track.as_str(), "track-3");
//! ```
//!
//! Shuffle keeps the pre-shuffle order around so it can be restored:
//!
//! ```rust
//! use coda_core::{RepeatMode, TrackId};
//! use coda_session::{QueueSession, QueueSource};
//!
//! let mut session = QueueSession::default();
//! session.append_many(
//!     (1..=5).map(|n| TrackId::new(format!("track-{n}"))).collect(),
//!     QueueSource::Album { id: "album-9".into() },
//! );
//! session.play_at(0).unwrap();
//!
//! session.enable_shuffle();
//! session.set_repeat(RepeatMode::All);
//! assert!(session.is_shuffled());
//!
//! session.disable_shuffle();
//! let order: Vec<_> = session.items().iter().map(|i| i.track.as_str()).collect();
//! assert_eq!(order, vec!["track-1", "track-2", "track-3", "track-4", "track-5"]);
//! ```

mod error;
mod events;
mod session;
mod shuffle;
mod snapshot;
mod store;
pub mod types;

pub use error::{Result, SessionError};
pub use events::SessionEvent;
pub use session::QueueSession;
pub use snapshot::SessionSnapshot;
pub use store::QueueStore;
pub use types::{QueueItem, QueueSource, SessionConfig, SkipOutcome};
