use reqwest::Client;

use crate::{
    spotify::{ApiError, get_json},
    types::{Album, AlbumResponse},
};

pub const ALBUM_GROUPS: &str = "album,single";
pub const ALBUM_LIMIT: &str = "10";

/// Retrieves albums and singles released by an artist.
///
/// Appearances and compilations are excluded and only the first page of ten
/// releases is fetched.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `api_url` - Base URL of the Web API
/// * `token` - Valid access token
/// * `artist_id` - Spotify ID of the artist
///
/// # Returns
///
/// - `Ok(Vec<Album>)` - Up to ten releases in Spotify's order
/// - `Err(ApiError)` - Network error, non-2xx status or malformed body
///
/// # API Endpoint
///
/// `GET /artists/{id}/albums?include_groups=album,single&limit=10`
pub async fn get_albums(
    client: &Client,
    api_url: &str,
    token: &str,
    artist_id: &str,
) -> Result<Vec<Album>, ApiError> {
    let url = format!("{uri}/artists/{id}/albums", uri = api_url, id = artist_id);
    let res: AlbumResponse = get_json(
        client,
        &url,
        token,
        &[("include_groups", ALBUM_GROUPS), ("limit", ALBUM_LIMIT)],
        "Failed to fetch albums.",
    )
    .await?;

    Ok(res.items)
}
