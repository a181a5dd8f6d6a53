use std::time::Duration;

use tokio_util::sync::CancellationToken;

use quake_api_server::AppState;

use crate::config::{ServeArgs, ServerConfig};
use crate::error::ServerError;

pub async fn run(args: ServeArgs) -> Result<(), ServerError> {
    tracing::info!("quake-server starting");

    // --- Load config ---
    let config = ServerConfig::load(&args.config)?;
    tracing::info!(config = %args.config, storage = %config.storage, "loaded config");

    // --- Open the store (held for the process lifetime) ---
    let store = config.open_store()?;
    store.init().await?;

    // --- CancellationToken for graceful shutdown ---
    let token = CancellationToken::new();

    // --- API server (HTTP) ---
    let state = AppState::new(store.clone(), config.region_filter());
    let bind = config.bind.clone();
    let api_port = config.api_port;
    let api_token = token.clone();
    let mut api_handle = tokio::spawn(async move {
        if let Err(e) = quake_api_server::run(&bind, api_port, state, api_token).await {
            tracing::error!(error = %e, "api server error");
        }
    });

    tracing::info!("server ready");

    // --- Wait for Ctrl+C (or the API dying on its own) ---
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            tracing::info!("shutting down...");
        }
        _ = &mut api_handle => {
            tracing::warn!("api server stopped unexpectedly");
        }
    }

    // Signal the API to stop accepting and drain in-flight requests
    token.cancel();

    // Drain: wait up to 5s, then abort
    if !api_handle.is_finished()
        && tokio::time::timeout(Duration::from_secs(5), &mut api_handle).await.is_err()
    {
        tracing::warn!("api server did not drain in time, aborting");
        api_handle.abort();
    }

    // Release the store connection
    if let Err(e) = store.close().await {
        tracing::error!(error = ?e, "store close error");
    }

    tracing::info!("shutdown complete");
    Ok(())
}
