use serde::{Deserialize, Serialize};

/// A deck holds at most this many cards at any committed point in time.
pub const MAX_DECK_CARDS: usize = 8;

/// A locally registered user. The password hash never leaves the storage
/// layer; this model is what credential verification hands back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Card metadata as the rest of the app consumes it: the external id is the
/// stable key, icon URLs are nested and always present (empty string when
/// the remote source omitted them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub rarity: String,
    pub elixir_cost: i64,
    pub max_level: i64,
    pub max_evolution_level: i64,
    pub icon_urls: IconUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconUrls {
    pub medium: String,
    pub evolution_medium: String,
}

/// One card row as stored: flat snake_case columns. The single place where
/// the flat shape turns into the nested [`Card`] shape is
/// [`CardRow::into_card`]; storage code never maps columns ad hoc.
#[derive(Debug, Clone)]
pub struct CardRow {
    pub card_id: i64,
    pub name: String,
    pub rarity: String,
    pub elixir_cost: i64,
    pub max_level: i64,
    pub max_evolution: i64,
    pub icon_url_medium: String,
    pub icon_url_large: String,
}

impl CardRow {
    /// The `icon_url_large` column holds the evolution icon; the original
    /// schema named it before evolutions existed and was never migrated.
    pub fn into_card(self) -> Card {
        Card {
            id: self.card_id,
            name: self.name,
            rarity: self.rarity,
            elixir_cost: self.elixir_cost,
            max_level: self.max_level,
            max_evolution_level: self.max_evolution,
            icon_urls: IconUrls {
                medium: self.icon_url_medium,
                evolution_medium: self.icon_url_large,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub deck_id: i64,
    pub user_id: i64,
    pub name: String,
}

/// A deck together with its associated cards, as loaded by the repository
/// and edited by the builder session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckWithCards {
    #[serde(flatten)]
    pub deck: Deck,
    pub cards: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> CardRow {
        CardRow {
            card_id: 26000000,
            name: "Knight".into(),
            rarity: "Common".into(),
            elixir_cost: 3,
            max_level: 14,
            max_evolution: 1,
            icon_url_medium: "https://cdn.example/knight.png".into(),
            icon_url_large: "https://cdn.example/knight_ev1.png".into(),
        }
    }

    #[test]
    fn row_maps_to_nested_icon_shape() {
        let card = sample_row().into_card();
        assert_eq!(card.id, 26000000);
        assert_eq!(card.name, "Knight");
        assert_eq!(card.max_evolution_level, 1);
        assert_eq!(card.icon_urls.medium, "https://cdn.example/knight.png");
        assert_eq!(
            card.icon_urls.evolution_medium,
            "https://cdn.example/knight_ev1.png"
        );
    }

    #[test]
    fn row_maps_empty_icon_columns_verbatim() {
        let mut row = sample_row();
        row.icon_url_medium = String::new();
        row.icon_url_large = String::new();
        let card = row.into_card();
        assert_eq!(card.icon_urls.medium, "");
        assert_eq!(card.icon_urls.evolution_medium, "");
    }

    #[test]
    fn card_serializes_camel_case() {
        let card = sample_row().into_card();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["elixirCost"], 3);
        assert_eq!(json["maxEvolutionLevel"], 1);
        assert!(json["iconUrls"]["evolutionMedium"].is_string());
    }

    #[test]
    fn deck_with_cards_flattens_deck_fields() {
        let dwc = DeckWithCards {
            deck: Deck {
                deck_id: 4,
                user_id: 1,
                name: "Ladder".into(),
            },
            cards: vec![],
        };
        let json = serde_json::to_value(&dwc).unwrap();
        assert_eq!(json["deckId"], 4);
        assert_eq!(json["cards"].as_array().unwrap().len(), 0);
    }
}
