//! Composition root: owns the storage handle and wires it into the stores.
//! The UI layer embeds the library crates the same way; this binary exists
//! to bring a fresh install up (schema + card cache) from the command line.

use std::path::PathBuf;

use tracing::{info, warn};

use arena_catalog::RemoteCardSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arena=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("ARENA_DB_PATH").unwrap_or_else(|_| "deckbuilder.db".into());
    let cards_url = std::env::var("ARENA_CARDS_URL")
        .unwrap_or_else(|_| "https://api.clashroyale.com/v1/cards".into());
    let api_token = std::env::var("ARENA_API_TOKEN").unwrap_or_default();

    if api_token.is_empty() {
        warn!("ARENA_API_TOKEN is not set; hydration will fail against the real API");
    }

    // Init database
    let db = arena_db::Database::open(&PathBuf::from(&db_path))?;

    // Warm the card cache; a non-empty cache skips the network entirely.
    let source = RemoteCardSource::new(cards_url, api_token);
    let fetched = arena_catalog::hydrate_if_empty(&db, &source).await?;
    if fetched > 0 {
        info!(fetched, "card catalog cached");
    }

    let cards = db.card_count()?;
    info!(cards, "card cache ready");
    Ok(())
}
