// Spotify accounts client — client-credentials OAuth exchange.
//
// One round trip: POST /api/token with HTTP Basic app credentials and
// grant_type=client_credentials. The resulting token lets the mobile app
// query the Spotify Web API for track metadata; it grants no access to
// any Spotify user's account or settings.

use anyhow::{Context, Result};
use tracing::debug;

/// Default Spotify accounts endpoint.
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com";

/// HTTP client for the Spotify accounts service.
pub struct SpotifyAuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl SpotifyAuthClient {
    /// Create a new accounts client pointing at the given base URL.
    ///
    /// Defaults to `https://accounts.spotify.com` — pass a different URL
    /// for testing.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("recd-server/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange app credentials for an access token.
    ///
    /// Returns the raw response body on 2xx so the caller can relay it
    /// verbatim. Any other status (or a transport failure) becomes an
    /// error carrying the upstream status and body — for server-side
    /// logging only, never for exposure to the caller.
    pub async fn client_credentials_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String> {
        let url = format!("{}/api/token", self.base_url);

        debug!("Requesting Spotify client-credentials token");

        let response = self
            .client
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("Spotify token request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Spotify token endpoint returned {status}: {body}");
        }

        response
            .text()
            .await
            .context("Failed to read Spotify token response")
    }
}
