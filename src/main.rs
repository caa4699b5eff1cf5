// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use nr_kpi_dashboard::application::catalog_service::CatalogService;
use nr_kpi_dashboard::application::dashboard_service::DashboardService;
use nr_kpi_dashboard::infrastructure::config::load_dashboard_config;
use nr_kpi_dashboard::infrastructure::csv_repository::CsvRepository;
use nr_kpi_dashboard::presentation::app_state::AppState;
use nr_kpi_dashboard::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load configuration")?;

    // Load the dataset once; a bad source aborts startup
    let repository = Arc::new(
        CsvRepository::load(&config.data.path)
            .with_context(|| format!("Failed to load dataset from {}", config.data.path))?,
    );

    // Create services (application layer)
    let catalog_service = CatalogService::new(repository.clone());
    let dashboard_service = DashboardService::new(repository.clone(), config.charts.clone());

    // Create application state
    let state = Arc::new(AppState {
        catalog_service,
        dashboard_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Starting nr-kpi-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
