use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use recd_server::config::Config;
use recd_server::expo::client::ExpoPushClient;
use recd_server::spotify::client::SpotifyAuthClient;
use recd_server::store::firestore::FirestoreUserStore;
use recd_server::web::{run_server, AppState};

/// Recd backend: Spotify token exchange and push notification delivery.
#[derive(Parser)]
#[command(name = "recd-server", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("recd_server=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.require_spotify()?;
    config.require_firestore()?;

    let state = AppState {
        store: Arc::new(FirestoreUserStore::new(
            &config.firestore_url,
            &config.firestore_project_id,
        )?),
        gateway: Arc::new(ExpoPushClient::new(&config.expo_push_url)?),
        spotify: Arc::new(SpotifyAuthClient::new(&config.spotify_auth_url)?),
        config: Arc::new(config),
    };

    run_server(state, cli.port, &cli.bind).await
}
