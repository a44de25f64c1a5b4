//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, cache setup, worker spawning, and the Axum
//! server lifecycle.

use crate::application::services::{AuthService, BoardService, ProfileService};
use crate::config::{Config, StorageBackend};
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{BusinessRepository, LinkRepository, TokenRepository};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{
    PgBusinessRepository, PgLinkRepository, PgTokenRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Repository handles shared by services and the click worker.
pub struct Repositories {
    pub links: Arc<dyn LinkRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl Repositories {
    /// Backs every repository with one in-process store.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            links: store.clone(),
            businesses: store.clone(),
            tokens: store,
        }
    }

    /// Backs every repository with PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        let pool = Arc::new(pool);
        Self {
            links: Arc::new(PgLinkRepository::new(pool.clone())),
            businesses: Arc::new(PgBusinessRepository::new(pool.clone())),
            tokens: Arc::new(PgTokenRepository::new(pool)),
        }
    }
}

/// Opens a connection pool with the configured limits and applies migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Wires services over the given repositories.
pub fn build_state(
    config: &Config,
    repos: &Repositories,
    cache: Arc<dyn CacheService>,
    click_sender: mpsc::Sender<crate::domain::click_event::ClickEvent>,
) -> AppState {
    AppState {
        board_service: Arc::new(BoardService::new(
            repos.links.clone(),
            config.rollback_on_failure,
        )),
        profile_service: Arc::new(ProfileService::new(
            repos.businesses.clone(),
            repos.links.clone(),
            cache.clone(),
            config.public_base_url.clone(),
        )),
        auth_service: Arc::new(AuthService::new(
            repos.tokens.clone(),
            repos.businesses.clone(),
            config.token_signing_secret.clone(),
        )),
        cache,
        click_sender,
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL with migrations, or in-memory)
/// - Redis cache (or NullCache fallback)
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or bind fail.
pub async fn run(config: Config) -> Result<()> {
    let repos = match (config.storage, &config.database_url) {
        (StorageBackend::Postgres, Some(url)) => {
            Repositories::postgres(connect_database(&config, url).await?)
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required when STORAGE=postgres")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Repositories::memory()
        }
    };

    let cache = connect_cache(&config).await;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        repos.links.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!("Click worker started");

    let state = build_state(&config, &repos, cache, click_tx);
    let app = app_router(state, config.rate_limit);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and with it the last click sender) is gone; let the worker drain.
    if tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .is_err()
    {
        tracing::warn!("Click worker did not drain in time");
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
