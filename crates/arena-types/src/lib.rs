pub mod models;
pub mod remote;

pub use models::{Card, CardRow, Deck, DeckWithCards, IconUrls, User, MAX_DECK_CARDS};
pub use remote::{CardsResponse, RemoteCard, RemoteIconUrls};
