use arena_types::MAX_DECK_CARDS;
use thiserror::Error;

/// The storage engine rejected a read or write. Fatal to the in-flight
/// operation, never retried here; absence of a row is `Ok(None)` at the
/// query level, not one of these.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("a deck cannot have more than {MAX_DECK_CARDS} cards")]
    Full,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<rusqlite::Error> for DeckError {
    fn from(e: rusqlite::Error) -> Self {
        DeckError::Storage(StorageError::Sqlite(e))
    }
}
