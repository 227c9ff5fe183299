//! Remote card catalog client and the populate-if-empty cache strategy.
//!
//! The local `cards` table is a pure cache of the remote catalog: it is
//! filled once when found empty and then served from storage forever after.
//! Staleness is accepted; there is no automatic re-fetch.

pub mod source;

pub use source::{CardSource, RemoteCardSource};

use thiserror::Error;
use tracing::{debug, info};

use arena_db::{Database, StorageError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("remote card API returned status {0}")]
    RemoteFetch(u16),
    #[error("remote card API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fills the card cache from `source` when, and only when, it is empty.
/// A non-empty cache means no network call and no writes, even if stale.
/// Returns the number of cards cached (0 when the cache was already warm).
///
/// Not atomic across rows: a failure partway leaves earlier upserts behind,
/// which is safe to re-run since each upsert is idempotent per id.
pub async fn hydrate_if_empty<S: CardSource>(
    db: &Database,
    source: &S,
) -> Result<usize, CatalogError> {
    let count = db.card_count()?;
    if count > 0 {
        debug!(count, "card cache already populated, skipping hydration");
        return Ok(0);
    }

    let items = source.fetch_all().await?;
    let total = items.len();
    for item in items {
        db.upsert_card(&item.into_card())?;
    }
    info!(total, "card cache hydrated from remote catalog");
    Ok(total)
}
