use std::sync::Arc;

use mediashelf_api::{
    api::{create_router, AppState},
    config::Config,
    services::{ExampleCatalog, InMemoryStore, StaticCatalog, SystemClock},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = match &config.catalog_path {
        Some(path) => StaticCatalog::from_path(path)?,
        None => StaticCatalog::builtin()?,
    };
    let catalog: Arc<dyn ExampleCatalog> = Arc::new(catalog);

    // Initialize application state
    let state = AppState::new(Arc::new(InMemoryStore::new()), catalog, Arc::new(SystemClock));

    // Create the router with all routes
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
