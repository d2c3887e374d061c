use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reviewer_roster::adapters::http::{app, AppState};
use reviewer_roster::adapters::{PostgresStore, ThreadRandomSource};
use reviewer_roster::application::RandomReviewerPicker;
use reviewer_roster::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    init_tracing(&config);

    info!(
        environment = ?config.server.environment,
        "Starting reviewer roster"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await
        .context("connecting to database")?;

    if config.database.run_migrations {
        sqlx::migrate!()
            .run(&pool)
            .await
            .context("running migrations")?;
        info!("Migrations applied");
    }

    let store = Arc::new(PostgresStore::new(pool));
    let picker = Arc::new(RandomReviewerPicker::new(Arc::new(ThreadRandomSource)));
    let router = app(AppState::new(store, picker), config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Server listening");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::signal::ctrl_c()
        .await
        .context("installing shutdown signal handler")?;
    info!("Shutdown signal received, draining requests");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(config.server.shutdown_timeout(), server).await {
        Ok(joined) => joined.context("server task panicked")??,
        Err(_) => warn!("Shutdown grace period elapsed with requests in flight"),
    }

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.use_json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
