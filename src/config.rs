//! Configuration management for the Spotify Artist Finder.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. The client credentials are the only required values;
//! endpoints and the market region fall back to Spotify's public defaults.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the current working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_MARKET: &str = "US";

/// Loads environment variables from `.env` files.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `artfind/.env` inside the platform-specific
/// local data directory, followed by a `.env` in the working directory.
/// Variables that are already set are never overwritten.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/artfind/.env`
/// - macOS: `~/Library/Application Support/artfind/.env`
/// - Windows: `%LOCALAPPDATA%/artfind/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - A `.env` file exists but cannot be read or parsed
///
/// A missing `.env` file is not an error.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Returns the application directory inside the local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("artfind");
    path
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Errors
///
/// Returns an error message if the variable is unset or empty.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable. Together
/// with the client ID it forms the Basic credentials of the client-credentials
/// grant.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
///
/// # Errors
///
/// Returns an error message if the variable is unset or empty.
pub fn spotify_client_secret() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, defaulting to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, defaulting to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the market used for top-track lookups.
///
/// Reads `SPOTIFY_MARKET`, defaulting to `US`.
pub fn spotify_market() -> String {
    env::var("SPOTIFY_MARKET").unwrap_or_else(|_| DEFAULT_MARKET.to_string())
}

fn required(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} must be set", name)),
    }
}

/// Everything the token exchange and catalog requests need to know about
/// the remote service.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
    pub market: String,
}

impl SpotifySettings {
    /// Builds settings with the public Spotify endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            market: DEFAULT_MARKET.to_string(),
        }
    }

    /// Reads the settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails when either client credential is missing.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
            market: spotify_market(),
        })
    }

    /// Points both the token endpoint and the catalog at another host.
    ///
    /// The token endpoint becomes `<base>/api/token` and the catalog
    /// `<base>/v1`, mirroring the layout of the real service.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.token_url = format!("{}/api/token", base);
        self.api_url = format!("{}/v1", base);
        self
    }

    /// The value of the `Authorization` header for the token exchange:
    /// `Basic base64(client_id:client_secret)`.
    pub fn basic_auth(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        format!("Basic {}", encoded)
    }
}
