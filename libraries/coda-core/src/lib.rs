//! Coda Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Coda Player.
//!
//! This crate provides the foundational building blocks shared by the queue
//! session, the storage layer, and the player shell.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Identifiers**: `TrackId`, `QueueItemId`
//! - **Domain Types**: `Track`, `RepeatMode`
//! - **Core Traits**: `TrackCatalog`
//! - **Error Handling**: Unified `CodaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use coda_core::types::Track;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! let mut track = Track::new("My Favorite Song", PathBuf::from("/music/song.mp3"));
//! track.set_duration(Duration::from_secs(212));
//!
//! assert_eq!(track.duration(), Some(Duration::from_secs(212)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CodaError, Result};
pub use traits::TrackCatalog;
pub use types::{QueueItemId, RepeatMode, Track, TrackId};
