// POST /api/spotify/token — proxy the client-credentials exchange.
//
// On upstream success the Spotify response body is relayed verbatim as
// JSON. On any failure the caller gets a fixed generic 500 — upstream
// status and error detail stay in the server logs.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::web::{api_error, AppState};

pub async fn retrieve_access_token(State(state): State<AppState>) -> Response {
    let config = &state.config;

    match state
        .spotify
        .client_credentials_token(&config.spotify_client_id, &config.spotify_client_secret)
        .await
    {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Spotify access token exchange failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
        }
    }
}
