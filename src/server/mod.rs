//! REST exposure of the content API

pub mod handlers;
pub mod router;

pub use handlers::{ContentState, ListQuery};
pub use router::{AppState, build_router, content_routes};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with an env-filter (`RUST_LOG`), defaulting to `info`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Bind and serve the API until the process is stopped
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    init_tracing();

    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "content API listening");

    axum::serve(listener, router).await?;
    Ok(())
}
