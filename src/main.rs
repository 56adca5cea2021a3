//!
//! Smart parking reservation server.
//! Reads configuration from TOML file (~/.config/parking-service/config.toml).

use std::sync::Arc;
use std::time::Instant;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use smart_parking::application::{LifecycleManager, SlotAllocator, SlotLockRegistry};
use smart_parking::application::start_availability_refresh_task;
use smart_parking::config::AppConfig;
use smart_parking::infrastructure::database::migrator::Migrator;
use smart_parking::infrastructure::database::seed::seed_if_empty;
use smart_parking::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use smart_parking::{
    create_api_router, create_event_bus, default_config_path, init_database, ApiState,
    DatabaseConfig, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PARKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!("Starting Smart Parking Service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Initialize repository provider
    let repos: Arc<dyn smart_parking::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Bootstrap the default slot catalog and sample drivers on first run
    if let Err(e) = seed_if_empty(repos.as_ref()).await {
        warn!("Failed to seed catalog: {}", e);
    }

    // Initialize event bus for real-time notifications
    let event_bus = create_event_bus();
    info!("Event bus initialized for real-time notifications");

    // ── Allocation services ────────────────────────────────────
    let locks = SlotLockRegistry::shared();
    let allocator = Arc::new(SlotAllocator::new(
        repos.clone(),
        locks.clone(),
        event_bus.clone(),
    ));
    let lifecycle = Arc::new(LifecycleManager::new(
        repos.clone(),
        locks.clone(),
        event_bus.clone(),
    ));

    // Initialize shutdown signal and listen for SIGTERM/SIGINT
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // Start the availability refresh background task
    start_availability_refresh_task(
        repos.clone(),
        locks.clone(),
        event_bus.clone(),
        shutdown.clone(),
        app_cfg.tasks.availability_refresh_secs,
    );

    // Create REST API router
    let api_router = create_api_router(ApiState {
        repos,
        allocator,
        lifecycle,
        event_bus,
        db: db.clone(),
        started_at: Arc::new(Instant::now()),
    });

    // Start REST API server with graceful shutdown
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // Perform final cleanup
    info!("Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Smart Parking Service shutdown complete");
    Ok(())
}

fn init_tracing(cfg: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    if cfg.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
