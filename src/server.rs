//! HTTP server initialization and runtime setup.
//!
//! Wires the connection pool, migrations, cache, advisory oracle, click
//! worker, and Axum server lifecycle together.

use crate::config::Config;
use crate::application::services::{
    AnalyticsService, ClickLedgerService, LinkService, SecurityScorer,
};
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::advisory::{AdvisoryOracle, HttpOracle, NullOracle};
use crate::infrastructure::cache::{NullCache, RedirectCache, RedisCache};
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::fingerprint::Fingerprinter;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if the database connection, migrations, server bind, or
/// server runtime fail. Cache and oracle failures degrade to their null
/// implementations instead of failing startup.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache: Arc<dyn RedirectCache> = match &config.redis_url {
        Some(redis_url) => match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                info!("Redirect cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        },
        None => {
            info!("Redirect cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    };

    let oracle: Arc<dyn AdvisoryOracle> = match &config.advisory_url {
        Some(advisory_url) => match HttpOracle::new(advisory_url, config.advisory_timeout_ms) {
            Ok(http) => Arc::new(http),
            Err(e) => {
                warn!("Failed to build advisory client: {}. Using NullOracle.", e);
                Arc::new(NullOracle::new())
            }
        },
        None => Arc::new(NullOracle::new()),
    };

    let fingerprinter = match &config.fingerprint_salt {
        Some(salt) => Fingerprinter::new(salt.as_bytes().to_vec()),
        None => {
            warn!("FINGERPRINT_SALT not set; fingerprints rotate on restart");
            Fingerprinter::with_random_salt()
        }
    };

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repository = Arc::new(PgClickRepository::new(pool.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_repository.clone()));
    info!("Click worker started");

    let state = AppState::new(
        Arc::new(LinkService::new(link_repository)),
        Arc::new(ClickLedgerService::new(click_repository.clone())),
        Arc::new(AnalyticsService::new(
            click_repository,
            config.analytics_window,
        )),
        Arc::new(SecurityScorer::new(oracle.clone())),
        oracle,
        cache,
        click_tx,
        fingerprinter,
        config.base_url.clone(),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
