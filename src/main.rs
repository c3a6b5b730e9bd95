mod error;
mod models;
mod prompt;
mod routes;
mod stability;

use routes::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use crate::stability::StabilityClient;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    // Key absence is surfaced per request as a misconfiguration error, so the
    // server still starts without one; just make it loud in the logs.
    let api_key = std::env::var("STABILITY_API_KEY").ok().filter(|k| !k.is_empty());
    match &api_key {
        Some(key) => tracing::info!(
            "Using API key: {}...",
            &key[..std::cmp::min(8, key.len())]
        ),
        None => tracing::warn!("STABILITY_API_KEY not set, generation requests will fail"),
    }

    let state = AppState {
        api_key,
        backend: Arc::new(StabilityClient::new()),
    };

    let app = routes::create_router().with_state(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Starting server");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app).await.unwrap();
}
