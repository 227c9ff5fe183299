use rusqlite::Connection;
use tracing::info;

use crate::StorageError;

/// Idempotent schema creation, run once at connection-open time. There is no
/// versioning; `CREATE TABLE IF NOT EXISTS` is the only evolution strategy.
///
/// `cards.icon_url_large` holds the evolution icon despite the name; the
/// column predates evolutions and renaming it would orphan existing caches.
pub fn run(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS decks (
            deck_id     INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id),
            name        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
            card_id             INTEGER PRIMARY KEY,
            name                TEXT NOT NULL,
            rarity              TEXT NOT NULL,
            elixir_cost         INTEGER NOT NULL,
            max_level           INTEGER NOT NULL,
            max_evolution       INTEGER NOT NULL DEFAULT 0,
            icon_url_medium     TEXT NOT NULL DEFAULT '',
            icon_url_large      TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS deck_cards (
            deck_id     INTEGER NOT NULL REFERENCES decks(deck_id),
            card_id     INTEGER NOT NULL REFERENCES cards(card_id),
            PRIMARY KEY (deck_id, card_id)
        );

        CREATE INDEX IF NOT EXISTS idx_decks_user
            ON decks(user_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
