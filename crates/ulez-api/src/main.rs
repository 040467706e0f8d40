//! ULEZ checker server binary.
//!
//! Configuration comes entirely from the environment; see
//! [`ulez_api::AppConfig::from_env`] for the variable list.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ulez_api::{app, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let port = config.port;
    let state = AppState::with_config(config).context("failed to build upstream client")?;
    let router = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("ulez-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, router.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
