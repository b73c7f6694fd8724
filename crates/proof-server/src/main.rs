//! HTTP API serving an allowlist's Merkle root and membership proofs.

use std::sync::Arc;

use allowlist_merkle::{Allowlist, AllowlistError};
use axum::http::Method;
use axum::Router;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;

use config::{ConfigError, ServerConfig};

/// Application state shared across handlers. Built once, never mutated.
pub struct AppState {
    pub allowlist: Allowlist,
}

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Allowlist(#[from] AllowlistError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    tracing::info!("Starting allowlist proof server...");

    tracing::info!("Loading allowlist from {:?}", config.allowlist_path);
    let allowlist = Allowlist::from_path(&config.allowlist_path)?;
    tracing::info!(
        entries = allowlist.len(),
        root = %allowlist.root(),
        "Allowlist committed"
    );

    let state = Arc::new(AppState { allowlist });

    // Build router
    let app = Router::new()
        .merge(routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers(Any),
                ),
        )
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.addr,
            source,
        })?;
    tracing::info!("Listening on {}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
