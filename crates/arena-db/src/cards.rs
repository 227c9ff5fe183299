//! Card cache store: the local copy of the remote catalog. Rows are only
//! ever upserted keyed by the external id; nothing here creates or mutates
//! card data locally.

use rusqlite::{OptionalExtension, Row, params};

use arena_types::{Card, CardRow};

use crate::{Database, StorageError};

const CARD_COLUMNS: &str = "card_id, name, rarity, elixir_cost, max_level, \
     max_evolution, icon_url_medium, icon_url_large";

impl Database {
    pub fn card_count(&self) -> Result<i64, StorageError> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    /// Insert-or-replace keyed by the external card id. Re-running the same
    /// upsert is a no-op in effect, which is what lets a failed hydration be
    /// retried from scratch.
    pub fn upsert_card(&self, card: &Card) -> Result<(), StorageError> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO cards
                    (card_id, name, rarity, elixir_cost, max_level, max_evolution,
                     icon_url_medium, icon_url_large)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    card.id,
                    card.name,
                    card.rarity,
                    card.elixir_cost,
                    card.max_level,
                    card.max_evolution_level,
                    card.icon_urls.medium,
                    card.icon_urls.evolution_medium,
                ],
            )?;
            Ok(())
        })
    }

    /// Case-sensitive exact match on name. Absence is a normal outcome.
    pub fn get_card_by_name(&self, name: &str) -> Result<Option<Card>, StorageError> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {CARD_COLUMNS} FROM cards WHERE name = ?1"),
                    [name],
                    card_row,
                )
                .optional()?;
            Ok(row.map(CardRow::into_card))
        })
    }

    pub fn all_cards(&self) -> Result<Vec<Card>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {CARD_COLUMNS} FROM cards ORDER BY name"))?;
            let cards = stmt
                .query_map([], card_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(cards.into_iter().map(CardRow::into_card).collect())
        })
    }
}

pub(crate) fn card_row(row: &Row<'_>) -> rusqlite::Result<CardRow> {
    Ok(CardRow {
        card_id: row.get(0)?,
        name: row.get(1)?,
        rarity: row.get(2)?,
        elixir_cost: row.get(3)?,
        max_level: row.get(4)?,
        max_evolution: row.get(5)?,
        icon_url_medium: row.get(6)?,
        icon_url_large: row.get(7)?,
    })
}
