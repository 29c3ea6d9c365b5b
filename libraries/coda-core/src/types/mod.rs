//! Domain types shared across Coda Player crates

mod ids;
mod playback;
mod track;

pub use ids::{QueueItemId, TrackId};
pub use playback::RepeatMode;
pub use track::Track;
