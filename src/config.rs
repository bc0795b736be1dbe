use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Spotify app client id, used for the client-credentials exchange.
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    /// Spotify accounts endpoint (defaults to https://accounts.spotify.com).
    /// Overridable so tests can point at a stub server.
    pub spotify_auth_url: String,
    /// Expo push service endpoint (defaults to https://exp.host).
    pub expo_push_url: String,
    /// Firestore project holding the users/{uid} documents.
    pub firestore_project_id: String,
    /// Firestore REST endpoint (defaults to https://firestore.googleapis.com).
    pub firestore_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Endpoint URLs all have production defaults — only the Spotify
    /// credentials and the Firestore project id must be provided.
    pub fn load() -> Result<Self> {
        Ok(Self {
            spotify_client_id: env::var("SPOTIFY_CLIENT_ID").unwrap_or_default(),
            spotify_client_secret: env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default(),
            spotify_auth_url: env::var("SPOTIFY_AUTH_URL")
                .unwrap_or_else(|_| crate::spotify::client::DEFAULT_SPOTIFY_AUTH_URL.to_string()),
            expo_push_url: env::var("EXPO_PUSH_URL")
                .unwrap_or_else(|_| crate::expo::client::DEFAULT_EXPO_URL.to_string()),
            firestore_project_id: env::var("FIRESTORE_PROJECT_ID").unwrap_or_default(),
            firestore_url: env::var("FIRESTORE_URL")
                .unwrap_or_else(|_| crate::store::firestore::DEFAULT_FIRESTORE_URL.to_string()),
        })
    }

    /// Check that the Spotify credentials are configured.
    /// Call this before serving the token exchange endpoint.
    pub fn require_spotify(&self) -> Result<()> {
        if self.spotify_client_id.is_empty() || self.spotify_client_secret.is_empty() {
            anyhow::bail!(
                "SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET not set. Add them to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the Firestore project is configured.
    /// Call this before serving the recd-item event endpoint.
    pub fn require_firestore(&self) -> Result<()> {
        if self.firestore_project_id.is_empty() {
            anyhow::bail!(
                "FIRESTORE_PROJECT_ID not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
