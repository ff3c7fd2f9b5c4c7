use chrono::Utc;
use reqwest::Client;

use crate::{
    config, error, info,
    management::{FileStore, SystemClock, TokenManager},
    success, utils, warning,
};

pub async fn token(refresh: bool) {
    let settings = match config::SpotifySettings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Cannot read Spotify credentials. Err: {}", e),
    };

    let store = FileStore::default();
    let path = store.path().display().to_string();
    let token_mgr = TokenManager::new(Client::new(), settings, store, SystemClock);

    if refresh {
        let pb = utils::spinner("Requesting a new Spotify token...");
        let token = token_mgr.refresh_token().await;
        pb.finish_and_clear();

        if token.is_none() {
            error!("Token refresh failed.");
        }
    }

    match token_mgr.cached_credential().await {
        Some(credential) => {
            let now = Utc::now().timestamp_millis();
            let expiry = utils::format_epoch_ms(credential.expires_at);
            if credential.is_valid_at(now) {
                let remaining = (credential.expires_at - now) / 1000;
                success!("Token valid until {} ({}s left)", expiry, remaining);
            } else {
                warning!("Token expired at {}; it is renewed on the next search.", expiry);
            }
            info!("Cache: {}", path);
        }
        None => warning!("No token cached yet. Run artfind token --refresh or search for an artist."),
    }
}
