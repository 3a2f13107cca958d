// Main entry point for the user directory API server

use std::sync::Arc;

use anyhow::{Context, Result};
use api_core::{server::build_app, Config};
use api_core::domains::auth::JwtCodec;
use jsonwebtoken::Algorithm;
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,api_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting User Directory API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Key material problems are fatal here, never per-request
    let algorithm: Algorithm = config
        .jwt_algorithm
        .parse()
        .context("JWT_ALGORITHM is not a recognized algorithm")?;
    let codec = JwtCodec::new(
        &config.read_private_key()?,
        &config.read_public_key()?,
        algorithm,
        config.jwt_expiration_minutes,
    )
    .context("Failed to build token codec")?;
    tracing::info!(algorithm = %config.jwt_algorithm, "Token codec ready");

    // Connect to database
    std::fs::create_dir_all("data").context("Failed to create data directory")?;
    tracing::info!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Install the Prometheus recorder before any requests are served
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    // Build application
    let app = build_app(pool, Arc::new(codec), metrics_handle);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("GraphQL endpoint: http://localhost:{}/graphql", config.port);
    tracing::info!("Health check: http://localhost:{}/api/v1/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
