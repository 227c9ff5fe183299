use reqwest::Client;
use tracing::debug;

use arena_types::{CardsResponse, RemoteCard};

use crate::CatalogError;

/// Where the full card catalog comes from. The production implementation is
/// [`RemoteCardSource`]; tests substitute their own.
pub trait CardSource {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<RemoteCard>, CatalogError>> + Send;
}

/// Bearer-token client for the remote card API. One GET returns the whole
/// catalog; the endpoint is never paginated.
pub struct RemoteCardSource {
    client: Client,
    cards_url: String,
    api_token: String,
}

impl RemoteCardSource {
    pub fn new(cards_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            cards_url: cards_url.into(),
            api_token: api_token.into(),
        }
    }
}

impl CardSource for RemoteCardSource {
    async fn fetch_all(&self) -> Result<Vec<RemoteCard>, CatalogError> {
        debug!(url = %self.cards_url, "fetching card catalog");
        let response = self
            .client
            .get(&self.cards_url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::RemoteFetch(status.as_u16()));
        }

        let body: CardsResponse = response.json().await?;
        Ok(body.items)
    }
}
