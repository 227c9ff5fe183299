//! Deck repository: durable CRUD over decks and their card associations.
//! The 8-card capacity invariant is enforced here, inside the store, not
//! trusted to callers.

use rusqlite::{OptionalExtension, params};

use arena_types::{Card, CardRow, Deck, DeckWithCards, MAX_DECK_CARDS};

use crate::cards::card_row;
use crate::{Database, DeckError, StorageError};

impl Database {
    /// Returns the generated deck id. Deck names are not unique.
    pub fn create_deck(&self, user_id: i64, name: &str) -> Result<i64, StorageError> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO decks (user_id, name) VALUES (?1, ?2)",
                params![user_id, name],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Adds one association, capacity permitting. The capacity check and the
    /// insert are a single conditional statement, so two overlapping calls
    /// can never both observe a stale count below the cap.
    pub fn add_card_to_deck(&self, deck_id: i64, card_id: i64) -> Result<(), DeckError> {
        let inserted = self.with_conn_mut(|conn| {
            let n = conn.execute(
                "INSERT INTO deck_cards (deck_id, card_id)
                 SELECT ?1, ?2
                 WHERE (SELECT COUNT(*) FROM deck_cards WHERE deck_id = ?1) < ?3",
                params![deck_id, card_id, MAX_DECK_CARDS as i64],
            )?;
            Ok(n)
        })?;
        if inserted == 0 {
            return Err(DeckError::Full);
        }
        Ok(())
    }

    /// Removing an association that does not exist is a no-op.
    pub fn remove_card_from_deck(&self, deck_id: i64, card_id: i64) -> Result<(), StorageError> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "DELETE FROM deck_cards WHERE deck_id = ?1 AND card_id = ?2",
                params![deck_id, card_id],
            )?;
            Ok(())
        })
    }

    pub fn get_user_decks(&self, user_id: i64) -> Result<Vec<Deck>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT deck_id, user_id, name FROM decks WHERE user_id = ?1")?;
            let decks = stmt
                .query_map([user_id], |row| {
                    Ok(Deck {
                        deck_id: row.get(0)?,
                        user_id: row.get(1)?,
                        name: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(decks)
        })
    }

    /// Loads a deck and its cards. A missing deck is `Ok(None)`; the
    /// association join is skipped entirely in that case.
    pub fn get_deck_with_cards(&self, deck_id: i64) -> Result<Option<DeckWithCards>, StorageError> {
        self.with_conn(|conn| {
            let deck = conn
                .query_row(
                    "SELECT deck_id, user_id, name FROM decks WHERE deck_id = ?1",
                    [deck_id],
                    |row| {
                        Ok(Deck {
                            deck_id: row.get(0)?,
                            user_id: row.get(1)?,
                            name: row.get(2)?,
                        })
                    },
                )
                .optional()?;

            let Some(deck) = deck else {
                return Ok(None);
            };

            let mut stmt = conn.prepare(
                "SELECT c.card_id, c.name, c.rarity, c.elixir_cost, c.max_level,
                        c.max_evolution, c.icon_url_medium, c.icon_url_large
                 FROM cards c
                 JOIN deck_cards dc ON c.card_id = dc.card_id
                 WHERE dc.deck_id = ?1",
            )?;
            let cards = stmt
                .query_map([deck_id], card_row)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(DeckWithCards {
                deck,
                cards: cards.into_iter().map(CardRow::into_card).collect(),
            }))
        })
    }

    /// Passthrough rename, no validation.
    pub fn update_deck_name(&self, deck_id: i64, new_name: &str) -> Result<(), StorageError> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "UPDATE decks SET name = ?1 WHERE deck_id = ?2",
                params![new_name, deck_id],
            )?;
            Ok(())
        })
    }

    /// Full replace of a deck's card set: delete-all then insert-all, in one
    /// transaction. Either the new set is committed whole or the old set
    /// survives untouched. The capacity cap is not re-checked here; the
    /// builder session enforces it in memory before flushing.
    pub fn update_deck_cards(&self, deck_id: i64, cards: &[Card]) -> Result<(), StorageError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM deck_cards WHERE deck_id = ?1", [deck_id])?;
            {
                let mut insert = tx
                    .prepare("INSERT INTO deck_cards (deck_id, card_id) VALUES (?1, ?2)")?;
                for card in cards {
                    insert.execute(params![deck_id, card.id])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
    }

    /// Deletes a deck and all of its associations atomically. Deleting a
    /// deck that never existed affects zero rows and is not an error.
    pub fn delete_deck(&self, deck_id: i64) -> Result<(), StorageError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM deck_cards WHERE deck_id = ?1", [deck_id])?;
            tx.execute("DELETE FROM decks WHERE deck_id = ?1", [deck_id])?;
            tx.commit()?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arena_types::IconUrls;

    use super::*;

    fn card(id: i64) -> Card {
        Card {
            id,
            name: format!("Card {id}"),
            rarity: "Common".into(),
            elixir_cost: 3,
            max_level: 14,
            max_evolution_level: 0,
            icon_urls: IconUrls::default(),
        }
    }

    /// Fresh database with one user and `n` cached cards (ids 1..=n).
    fn setup(n: i64) -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let user_id = db
            .with_conn_mut(|conn| {
                conn.execute(
                    "INSERT INTO users (username, password) VALUES ('tester', 'x')",
                    [],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .unwrap();
        for id in 1..=n {
            db.upsert_card(&card(id)).unwrap();
        }
        (db, user_id)
    }

    fn deck_card_ids(db: &Database, deck_id: i64) -> Vec<i64> {
        let mut ids: Vec<i64> = db
            .get_deck_with_cards(deck_id)
            .unwrap()
            .unwrap()
            .cards
            .iter()
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn create_deck_returns_generated_id() {
        let (db, user_id) = setup(0);
        let first = db.create_deck(user_id, "Ladder").unwrap();
        let second = db.create_deck(user_id, "Ladder").unwrap();
        assert_ne!(first, second); // duplicate names allowed, ids distinct
    }

    #[test]
    fn round_trip_create_add_get() {
        let (db, user_id) = setup(5);
        let deck_id = db.create_deck(user_id, "Cycle").unwrap();
        for id in 1..=5 {
            db.add_card_to_deck(deck_id, id).unwrap();
        }
        let loaded = db.get_deck_with_cards(deck_id).unwrap().unwrap();
        assert_eq!(loaded.deck.name, "Cycle");
        assert_eq!(loaded.deck.user_id, user_id);
        assert_eq!(deck_card_ids(&db, deck_id), vec![1, 2, 3, 4, 5]);
        assert_eq!(loaded.cards[0].icon_urls.medium, "");
    }

    #[test]
    fn ninth_card_rejected_and_count_unchanged() {
        let (db, user_id) = setup(9);
        let deck_id = db.create_deck(user_id, "Full").unwrap();
        for id in 1..=8 {
            db.add_card_to_deck(deck_id, id).unwrap();
        }
        let err = db.add_card_to_deck(deck_id, 9).unwrap_err();
        assert!(matches!(err, DeckError::Full));
        assert_eq!(deck_card_ids(&db, deck_id).len(), 8);
    }

    #[test]
    fn overlapping_adds_cannot_exceed_capacity() {
        let (db, user_id) = setup(9);
        let deck_id = db.create_deck(user_id, "Race").unwrap();
        for id in 1..=7 {
            db.add_card_to_deck(deck_id, id).unwrap();
        }

        // Two callers race for the last slot; exactly one may win.
        let db = Arc::new(db);
        let handles: Vec<_> = [8i64, 9i64]
            .into_iter()
            .map(|card_id| {
                let db = Arc::clone(&db);
                std::thread::spawn(move || db.add_card_to_deck(deck_id, card_id).is_ok())
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(deck_card_ids(&db, deck_id).len(), 8);
    }

    #[test]
    fn remove_missing_association_is_noop() {
        let (db, user_id) = setup(1);
        let deck_id = db.create_deck(user_id, "Sparse").unwrap();
        db.add_card_to_deck(deck_id, 1).unwrap();
        db.remove_card_from_deck(deck_id, 42).unwrap();
        db.remove_card_from_deck(deck_id, 1).unwrap();
        db.remove_card_from_deck(deck_id, 1).unwrap();
        assert!(deck_card_ids(&db, deck_id).is_empty());
    }

    #[test]
    fn replace_discards_previous_set() {
        let (db, user_id) = setup(6);
        let deck_id = db.create_deck(user_id, "Swap").unwrap();
        for id in 1..=3 {
            db.add_card_to_deck(deck_id, id).unwrap();
        }

        let new_set = [card(4), card(5), card(6)];
        db.update_deck_cards(deck_id, &new_set).unwrap();
        assert_eq!(deck_card_ids(&db, deck_id), vec![4, 5, 6]);

        db.update_deck_cards(deck_id, &[]).unwrap();
        assert!(deck_card_ids(&db, deck_id).is_empty());
    }

    #[test]
    fn replace_rolls_back_whole_on_bad_insert() {
        let (db, user_id) = setup(3);
        let deck_id = db.create_deck(user_id, "Atomic").unwrap();
        for id in 1..=2 {
            db.add_card_to_deck(deck_id, id).unwrap();
        }

        // card 99 was never cached; the FK rejects it and the whole
        // replacement rolls back, leaving the old set intact.
        let bad_set = [card(3), card(99)];
        assert!(db.update_deck_cards(deck_id, &bad_set).is_err());
        assert_eq!(deck_card_ids(&db, deck_id), vec![1, 2]);
    }

    #[test]
    fn delete_cascades_to_associations() {
        let (db, user_id) = setup(2);
        let deck_id = db.create_deck(user_id, "Doomed").unwrap();
        db.add_card_to_deck(deck_id, 1).unwrap();
        db.add_card_to_deck(deck_id, 2).unwrap();

        db.delete_deck(deck_id).unwrap();
        assert!(db.get_deck_with_cards(deck_id).unwrap().is_none());

        let orphans: i64 = db
            .with_conn(|conn| {
                let n = conn.query_row(
                    "SELECT COUNT(*) FROM deck_cards WHERE deck_id = ?1",
                    [deck_id],
                    |row| row.get(0),
                )?;
                Ok(n)
            })
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn delete_missing_deck_is_noop() {
        let (db, _) = setup(0);
        db.delete_deck(999).unwrap();
    }

    #[test]
    fn unknown_deck_is_none_not_error() {
        let (db, _) = setup(0);
        assert!(db.get_deck_with_cards(999).unwrap().is_none());
    }

    #[test]
    fn rename_persists() {
        let (db, user_id) = setup(0);
        let deck_id = db.create_deck(user_id, "Old").unwrap();
        db.update_deck_name(deck_id, "New").unwrap();
        let loaded = db.get_deck_with_cards(deck_id).unwrap().unwrap();
        assert_eq!(loaded.deck.name, "New");
    }

    #[test]
    fn user_decks_lists_only_that_users() {
        let (db, user_id) = setup(0);
        let other = db
            .with_conn_mut(|conn| {
                conn.execute(
                    "INSERT INTO users (username, password) VALUES ('other', 'x')",
                    [],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .unwrap();
        db.create_deck(user_id, "A").unwrap();
        db.create_deck(user_id, "B").unwrap();
        db.create_deck(other, "C").unwrap();

        let decks = db.get_user_decks(user_id).unwrap();
        assert_eq!(decks.len(), 2);
        assert!(decks.iter().all(|d| d.user_id == user_id));
        assert!(db.get_user_decks(12345).unwrap().is_empty());
    }
}
