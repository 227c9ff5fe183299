//! Wire shapes for the remote card API. The endpoint returns the full
//! catalog in one response (`{ "items": [...] }`, no pagination); icon URLs
//! may be missing per card and are normalized to empty strings before they
//! reach storage.

use serde::Deserialize;

use crate::models::{Card, IconUrls};

#[derive(Debug, Deserialize)]
pub struct CardsResponse {
    pub items: Vec<RemoteCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCard {
    pub id: i64,
    pub name: String,
    pub rarity: String,
    pub elixir_cost: i64,
    pub max_level: i64,
    #[serde(default)]
    pub max_evolution_level: i64,
    #[serde(default)]
    pub icon_urls: Option<RemoteIconUrls>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteIconUrls {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub evolution_medium: Option<String>,
}

impl RemoteCard {
    pub fn into_card(self) -> Card {
        let icons = self.icon_urls.unwrap_or(RemoteIconUrls {
            medium: None,
            evolution_medium: None,
        });
        Card {
            id: self.id,
            name: self.name,
            rarity: self.rarity,
            elixir_cost: self.elixir_cost,
            max_level: self.max_level,
            max_evolution_level: self.max_evolution_level,
            icon_urls: IconUrls {
                medium: icons.medium.unwrap_or_default(),
                evolution_medium: icons.evolution_medium.unwrap_or_default(),
            },
        }
    }
}
