use chrono::Utc;
use reqwest::Client;

use crate::{
    config::SpotifySettings,
    management::store::KeyValueStore,
    spotify,
    types::{Credential, TokenResponse},
    warning,
};

pub const TOKEN_KEY: &str = "spotify_token";
pub const TOKEN_EXPIRY_KEY: &str = "spotify_token_expiry";

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

impl<C: Clock> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

pub struct TokenManager<S, C = SystemClock> {
    client: Client,
    settings: SpotifySettings,
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> TokenManager<S, C> {
    pub fn new(client: Client, settings: SpotifySettings, store: S, clock: C) -> Self {
        TokenManager {
            client,
            settings,
            store,
            clock,
        }
    }

    /// The stored token if it is still valid, otherwise a freshly requested one.
    ///
    /// `None` means no credential could be obtained; callers must not issue
    /// dependent requests.
    pub async fn get_valid_token(&self) -> Option<String> {
        if let Some(credential) = self.cached_credential().await {
            if credential.is_valid_at(self.clock.now_ms()) {
                return Some(credential.access_token);
            }
        }

        self.refresh_token().await
    }

    /// Exchanges the client credentials for a new token and persists it,
    /// overwriting whatever was stored before.
    pub async fn refresh_token(&self) -> Option<String> {
        let response = match spotify::auth::request_client_credentials(&self.client, &self.settings)
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warning!("Failed to fetch Spotify token: {}", e);
                return None;
            }
        };

        let credential = self.credential_from(response);
        if let Err(e) = self.persist(&credential).await {
            warning!("Failed to save token to cache: {}", e);
        }

        Some(credential.access_token)
    }

    /// Reads the stored credential. A missing token, a missing expiry or an
    /// expiry that is not a base-10 integer all count as "nothing cached".
    pub async fn cached_credential(&self) -> Option<Credential> {
        let token = self.read(TOKEN_KEY).await?;
        let expiry = self.read(TOKEN_EXPIRY_KEY).await?;

        let expires_at = match expiry.trim().parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                warning!("Ignoring malformed token expiry {:?}", expiry);
                return None;
            }
        };

        if token.is_empty() {
            return None;
        }

        Some(Credential {
            access_token: token,
            expires_at,
        })
    }

    fn credential_from(&self, response: TokenResponse) -> Credential {
        Credential {
            access_token: response.access_token,
            expires_at: self
                .clock
                .now_ms()
                .saturating_add(response.expires_in.saturating_mul(1000)),
        }
    }

    async fn persist(&self, credential: &Credential) -> Result<(), String> {
        self.store
            .set(TOKEN_KEY, &credential.access_token)
            .await
            .map_err(|e| e.to_string())?;
        self.store
            .set(TOKEN_EXPIRY_KEY, &credential.expires_at.to_string())
            .await
            .map_err(|e| e.to_string())
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warning!("Failed to read {} from cache: {}", key, e);
                None
            }
        }
    }

    pub fn settings(&self) -> &SpotifySettings {
        &self.settings
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
