use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};

use crate::{config::SpotifySettings, spotify::ApiError, types::TokenResponse};

/// Requests an application token with the OAuth 2.0 client-credentials grant.
///
/// The application authenticates with its own client ID and secret (sent as
/// HTTP Basic credentials); no user is involved, so the resulting token only
/// grants access to public catalog data.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `settings` - Client credentials and the token endpoint URL
///
/// # Request
///
/// ```text
/// POST {token_url}
/// Authorization: Basic base64(client_id:client_secret)
/// Content-Type: application/x-www-form-urlencoded
///
/// grant_type=client_credentials
/// ```
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(TokenResponse)` - Access token and its lifetime in seconds
/// - `Err(ApiError)` - Network failure, non-2xx status or malformed body
///
/// # Example
///
/// ```
/// let response = request_client_credentials(&Client::new(), &settings).await?;
/// println!("Token expires in {} seconds", response.expires_in);
/// ```
pub async fn request_client_credentials(
    client: &Client,
    settings: &SpotifySettings,
) -> Result<TokenResponse, ApiError> {
    let response = client
        .post(&settings.token_url)
        .header(AUTHORIZATION, settings.basic_auth())
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("grant_type=client_credentials")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            context: "Failed to fetch Spotify token.".to_string(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
