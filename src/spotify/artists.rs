use reqwest::Client;

use crate::{
    spotify::{ApiError, get_json},
    types::{Artist, SearchArtistsResponse, TopTracksResponse, Track},
};

/// Searches the catalog for the artist that best matches `query`.
///
/// Only the single most relevant result is requested (`limit=1`).
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `api_url` - Base URL of the Web API, e.g. `https://api.spotify.com/v1`
/// * `token` - Valid access token
/// * `query` - Free-text artist name; URL-encoded before sending
///
/// # Returns
///
/// - `Ok(Some(Artist))` - The top match
/// - `Ok(None)` - The search succeeded but matched nothing
/// - `Err(ApiError)` - Network error, non-2xx status or malformed body
///
/// # Example
///
/// ```
/// match search_artist(&client, &api_url, &token, "Radiohead").await? {
///     Some(artist) => println!("{} ({} genres)", artist.name, artist.genres.len()),
///     None => println!("No artist found."),
/// }
/// ```
pub async fn search_artist(
    client: &Client,
    api_url: &str,
    token: &str,
    query: &str,
) -> Result<Option<Artist>, ApiError> {
    let url = format!("{uri}/search", uri = api_url);
    let res: SearchArtistsResponse = get_json(
        client,
        &url,
        token,
        &[("q", query), ("type", "artist"), ("limit", "1")],
        "Failed to fetch artist.",
    )
    .await?;

    Ok(res.artists.items.into_iter().next())
}

/// Retrieves the most popular tracks of an artist in one market.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `api_url` - Base URL of the Web API
/// * `token` - Valid access token
/// * `artist_id` - Spotify ID of the artist
/// * `market` - ISO 3166-1 alpha-2 country code the popularity is computed for
///
/// # Returns
///
/// - `Ok(Vec<Track>)` - Up to ten tracks, most popular first
/// - `Err(ApiError)` - Network error, non-2xx status or malformed body
pub async fn get_top_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    artist_id: &str,
    market: &str,
) -> Result<Vec<Track>, ApiError> {
    let url = format!(
        "{uri}/artists/{id}/top-tracks",
        uri = api_url,
        id = artist_id
    );
    let res: TopTracksResponse = get_json(
        client,
        &url,
        token,
        &[("market", market)],
        "Failed to fetch top tracks.",
    )
    .await?;

    Ok(res.tracks)
}
