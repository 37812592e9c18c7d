//! OBX Server - Main entry point

use anyhow::Result;
use obx_common::logging::{init_logging, LogConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use obx_server::{
    api, config::Config, db, features::FeatureState, mapping::ConceptMapper,
    normalizer::NodeNormalizerClient, protocol::ProtocolRegistry,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging from environment, with default filter directives
    // when LOG_FILTER is not set
    let mut log_config = LogConfig::from_env()?;
    if log_config.filter_directives.is_none() {
        log_config.filter_directives =
            Some("obx_server=debug,tower_http=debug,sqlx=info".to_string());
    }

    init_logging(&log_config)?;

    info!("Starting OBX Server");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    // Initialize database connection pool
    let pool = db::create_pool(&config.database).await?;
    info!("Database connection pool established");

    // Run migrations
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    info!("Database migrations completed");

    // Load the concept cross-reference table; it stays read-only for the
    // life of the process
    let mapper = Arc::new(ConceptMapper::load(&pool).await?);
    info!(curies = mapper.curie_count(), "Concept mapper ready");

    // Remote normalization client and protocol handler registry
    let normalizer = NodeNormalizerClient::new(&config.normalizer)?;
    let registry = Arc::new(ProtocolRegistry::standard(mapper.clone()));

    let state = FeatureState {
        db: pool,
        mapper,
        normalizer,
        registry,
        default_version: config.protocol.default_version.clone(),
    };

    // Build the application router
    let app = api::create_router(state, &config);

    // Create socket address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
