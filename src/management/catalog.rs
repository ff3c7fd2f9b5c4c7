use reqwest::Client;

use crate::{
    config::SpotifySettings,
    management::{
        auth::{Clock, SystemClock, TokenManager},
        store::KeyValueStore,
    },
    spotify::{self, ApiError},
    types::{Album, SearchOutcome, Track},
    warning,
};

/// Read-only queries against the catalog, each authenticated with a token
/// from the wrapped [`TokenManager`].
///
/// Nothing is cached or retried here. When no token can be obtained the query
/// fails with [`ApiError::Unauthenticated`] without touching the network.
pub struct Catalog<S, C = SystemClock> {
    tokens: TokenManager<S, C>,
}

impl<S: KeyValueStore, C: Clock> Catalog<S, C> {
    pub fn new(settings: SpotifySettings, store: S, clock: C) -> Self {
        Self::with_tokens(TokenManager::new(Client::new(), settings, store, clock))
    }

    pub fn with_tokens(tokens: TokenManager<S, C>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &TokenManager<S, C> {
        &self.tokens
    }

    pub async fn search_artist(&self, query: &str) -> Result<SearchOutcome, ApiError> {
        let token = self.token().await?;
        let result = spotify::artists::search_artist(
            self.tokens.client(),
            &self.tokens.settings().api_url,
            &token,
            query,
        )
        .await;

        match result {
            Ok(Some(artist)) => Ok(SearchOutcome::Found(artist)),
            Ok(None) => Ok(SearchOutcome::NotFound),
            Err(e) => Err(logged(e)),
        }
    }

    pub async fn list_albums(&self, artist_id: &str) -> Result<Vec<Album>, ApiError> {
        let token = self.token().await?;
        spotify::albums::get_albums(
            self.tokens.client(),
            &self.tokens.settings().api_url,
            &token,
            artist_id,
        )
        .await
        .map_err(logged)
    }

    pub async fn list_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>, ApiError> {
        let token = self.token().await?;
        let settings = self.tokens.settings();
        spotify::artists::get_top_tracks(
            self.tokens.client(),
            &settings.api_url,
            &token,
            artist_id,
            &settings.market,
        )
        .await
        .map_err(logged)
    }

    async fn token(&self) -> Result<String, ApiError> {
        self.tokens
            .get_valid_token()
            .await
            .ok_or(ApiError::Unauthenticated)
    }
}

fn logged(e: ApiError) -> ApiError {
    warning!("{}", e);
    e
}
