//! # Spotify Integration Module
//!
//! Thin, stateless wrappers around the handful of Spotify Web API endpoints the
//! artist finder needs. Each function performs exactly one HTTP request and turns
//! the response into typed data or an [`ApiError`]. Token caching lives in
//! [`crate::management::TokenManager`]; these functions take the bearer token as
//! an argument.
//!
//! ## Architecture
//!
//! ```text
//! CLI / ArtistFinder
//!          ↓
//! Catalog (management) ── TokenManager ── KeyValueStore
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client-credentials grant)
//!     ├── Artists (search, top tracks)
//!     └── Albums (albums and singles)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client-credentials token exchange
//! - `GET /search?type=artist&limit=1` - Best match for an artist name
//! - `GET /artists/{id}/albums?include_groups=album,single&limit=10` - Releases
//! - `GET /artists/{id}/top-tracks?market=..` - Most popular tracks
//!
//! ## Error Handling
//!
//! Nothing is retried. A non-2xx status becomes [`ApiError::Status`] carrying a
//! human-readable context message, a body that fails to decode becomes
//! [`ApiError::Decode`], and connection failures surface as
//! [`ApiError::Transport`].

pub mod albums;
pub mod artists;
pub mod auth;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{context} (HTTP {status})")]
    Status { status: u16, context: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No Spotify access token available.")]
    Unauthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Issues an authenticated GET request and decodes the JSON body.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `url` - Fully qualified endpoint URL without query string
/// * `token` - Bearer token sent in the `Authorization` header
/// * `query` - Query parameters, URL-encoded by reqwest
/// * `context` - Message used when the service answers with a non-2xx status
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    token: &str,
    query: &[(&str, &str)],
    context: &str,
) -> Result<T, ApiError> {
    let response = client
        .get(url)
        .bearer_auth(token)
        .query(query)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            context: context.to_string(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
