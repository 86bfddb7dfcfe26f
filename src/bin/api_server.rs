// src/bin/api_server.rs

use sweet_shop_api::transport;
use sweet_shop_api::{AppConfig, CatalogService};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AppConfig::from_env()?;

    // --- Service Initialization ---
    tracing::info!(url = %config.database_url, "Initializing CatalogService...");
    let catalog = CatalogService::connect(&config).await?;
    tracing::info!("CatalogService initialized, migrations applied.");

    let app_state = transport::http::AppState { catalog };

    // --- API Server Initialization ---
    let app = transport::http::build_app(app_state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("API server listening on http://{}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C.");
            }
            tracing::info!("Shutdown signal received, draining connections.");
        })
        .await?;

    tracing::info!("Graceful shutdown complete.");
    Ok(())
}
