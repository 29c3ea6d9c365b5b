/// Player-level errors
use thiserror::Error;

/// Result type alias using `PlayerError`
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Player error types
///
/// Thin composition of the layer errors; the facade adds no failure modes
/// of its own.
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Queue or session error
    #[error(transparent)]
    Session(#[from] coda_session::SessionError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] coda_storage::StorageError),

    /// Core error (catalog lookups)
    #[error(transparent)]
    Core(#[from] coda_core::CodaError),
}
