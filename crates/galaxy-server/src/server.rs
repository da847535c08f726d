//! Server loop

use crate::config::ServeConfig;
use crate::routes::router;

use galaxy_data::StarCatalog;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Catalog named by the config, or a synthetic one
pub fn load_catalog(config: &ServeConfig) -> Result<StarCatalog> {
    match &config.catalog {
        Some(path) => StarCatalog::load_csv(path),
        None => {
            tracing::info!(
                "No catalog given, generating {} synthetic stars (seed {})",
                config.synthetic_count,
                config.seed
            );
            Ok(StarCatalog::synthetic(config.synthetic_count, config.seed))
        }
    }
}

/// Serve `catalog` on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener, catalog: Arc<StarCatalog>) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Star service listening on http://{}", addr);
    tracing::info!("Health endpoint: http://{}/health", addr);

    axum::serve(listener, router(catalog))
        .await
        .context("star service failed")
}

pub async fn run_server(config: ServeConfig) -> Result<()> {
    let catalog = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || load_catalog(&config)).await??
    };
    tracing::info!("Catalog ready: {} stars", catalog.len());

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    serve(listener, Arc::new(catalog)).await
}
