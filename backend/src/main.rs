//! Exercise tracker entry-point: loads settings, prepares the log store and
//! serves the HTTP API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_tracker::inbound::http::health::HealthState;
use exercise_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use exercise_tracker::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.pool_max_size()),
            )
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
            config = config.with_db_pool(pool);
            info!("using PostgreSQL exercise store");
        }
        None => info!("no database configured; using in-memory exercise store"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "exercise tracker listening");
    server.await
}
