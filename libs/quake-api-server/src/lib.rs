use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use quake_api::RowStore;

mod error;
mod http;
pub mod regions;

pub use error::ApiError;
pub use regions::RegionFilter;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RowStore>,
    regions: Arc<RegionFilter>,
}

impl AppState {
    pub fn new(store: Arc<dyn RowStore>, regions: RegionFilter) -> Self {
        Self { store, regions: Arc::new(regions) }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(http::handle_health))
        .route("/api/fields", get(http::handle_list_fields))
        .route("/api/quake", get(http::handle_lookup))
        .with_state(state)
}

/// Bind `bind:port` and serve until `shutdown` is cancelled.
pub async fn run(
    bind: &str,
    port: u16,
    state: AppState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let listener = TcpListener::bind((bind, port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "api server listening");
    serve(listener, state, shutdown).await
}

/// Serve on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}
