//! atlas-backoffice server entry point.
//!
//! Starts the Axum HTTP server after connecting to PostgreSQL and running
//! migrations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use atlas_backoffice::api;
use atlas_backoffice::app_state::AppState;
use atlas_backoffice::assets::{AssetHost, CloudinaryHost};
use atlas_backoffice::config::AppConfig;
use atlas_backoffice::persistence::{GeoStore, InquiryStore, PgStore, TourStore};
use atlas_backoffice::service::{GeoService, InquiryService, TourService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting atlas-backoffice");

    // Connect to PostgreSQL; the service is useless without it, so a
    // failure here is fatal.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("database migration failed")?;
    tracing::info!("database ready");

    // Build persistence and asset layers
    let store = Arc::new(PgStore::new(pool));
    let assets: Arc<dyn AssetHost> = Arc::new(CloudinaryHost::new(&config));

    // Build service layer
    let tour_service = Arc::new(TourService::new(
        Arc::clone(&store) as Arc<dyn TourStore>,
        Arc::clone(&store) as Arc<dyn GeoStore>,
        Arc::clone(&assets),
    ));
    let geo_service = Arc::new(GeoService::new(
        Arc::clone(&store) as Arc<dyn GeoStore>,
        Arc::clone(&assets),
    ));
    let inquiry_service = Arc::new(InquiryService::new(store as Arc<dyn InquiryStore>));

    // Build application state
    let app_state = AppState {
        tour_service,
        geo_service,
        inquiry_service,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
