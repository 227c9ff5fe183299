//! In-memory deck editing session. The UI gets one mutable scratch copy of
//! one deck; edits never touch storage until an explicit save flushes the
//! whole state through the repository.

use tracing::debug;

use arena_db::{Database, DeckError};
use arena_types::{Card, DeckWithCards, MAX_DECK_CARDS};

/// At most one session is active per application instance. Starting a new
/// one silently discards an unsaved prior session; warning about unsaved
/// changes is the UI's business, not this type's.
#[derive(Debug, Default)]
pub struct DeckBuilderSession {
    active: Option<DeckWithCards>,
}

impl DeckBuilderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_building(&mut self, deck: DeckWithCards) {
        debug!(deck_id = deck.deck.deck_id, "starting deck builder session");
        self.active = Some(deck);
    }

    pub fn active_deck(&self) -> Option<&DeckWithCards> {
        self.active.as_ref()
    }

    /// Appends a card unless the deck is full or already holds it. Both
    /// rejections are silent no-ops; the repository remains the authority
    /// for the committed capacity invariant.
    pub fn add_card(&mut self, card: Card) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.cards.len() >= MAX_DECK_CARDS {
            return;
        }
        if active.cards.iter().any(|c| c.id == card.id) {
            return;
        }
        active.cards.push(card);
    }

    /// Removes the card with the given id, if present.
    pub fn remove_card(&mut self, card_id: i64) {
        if let Some(active) = self.active.as_mut() {
            active.cards.retain(|c| c.id != card_id);
        }
    }

    /// No validation; the empty string is a legal deck name.
    pub fn update_active_deck_name(&mut self, name: impl Into<String>) {
        if let Some(active) = self.active.as_mut() {
            active.deck.name = name.into();
        }
    }

    /// Flushes the session's name and card set to the repository. The name
    /// update and the card replacement are each individually atomic; there
    /// is no ordering guarantee between the two. The session stays active
    /// afterward so the UI can keep editing; call [`clear_active_deck`]
    /// when done.
    ///
    /// [`clear_active_deck`]: DeckBuilderSession::clear_active_deck
    pub fn save(&self, db: &Database) -> Result<(), DeckError> {
        let Some(active) = self.active.as_ref() else {
            return Ok(());
        };
        db.update_deck_name(active.deck.deck_id, &active.deck.name)?;
        db.update_deck_cards(active.deck.deck_id, &active.cards)?;
        debug!(
            deck_id = active.deck.deck_id,
            cards = active.cards.len(),
            "deck saved"
        );
        Ok(())
    }

    pub fn clear_active_deck(&mut self) {
        self.active = None;
    }
}
