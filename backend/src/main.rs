//! Service entry-point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use user_directory::config::AppSettings;
use user_directory::inbound::http::health::HealthState;
use user_directory::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server, drain_on};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load configuration")?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            run_pending_migrations(database_url)
                .await
                .wrap_err("failed to apply database migrations")?;
        }
        let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size()?);
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(ctrl_c(), health_state, server.handle()));
    server.await?;
    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the signal cannot be watched.
async fn ctrl_c() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
