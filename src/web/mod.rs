// Web server — Axum HTTP surface for the Recd backend.
//
// Two real routes: the Spotify token exchange proxy and the recd-item
// creation webhook (the event that fans out push notifications), plus a
// hosting-platform health check.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::expo::traits::PushGateway;
use crate::spotify::client::SpotifyAuthClient;
use crate::store::UserStore;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn UserStore>,
    pub gateway: Arc<dyn PushGateway>,
    pub spotify: Arc<SpotifyAuthClient>,
}

/// Start the web server and block until it exits.
pub async fn run_server(state: AppState, port: u16, bind: &str) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Recd backend listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the application router. Public so tests can drive it with
/// `tower::ServiceExt::oneshot` without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // The original hosting surface accepted any method here; GET and
        // POST are the ones clients actually use.
        .route(
            "/api/spotify/token",
            get(handlers::spotify::retrieve_access_token)
                .post(handlers::spotify::retrieve_access_token),
        )
        .route(
            "/events/user_recds/{uid}/recd_items/{rid}",
            post(handlers::recd::recd_item_created),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Hosting-platform health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
