//! Items API - A small item CRUD service
//!
//! Serves items from PostgreSQL and mirrors every write into a cache.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context};
use axum::http::HeaderValue;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use items_api::cache::{ItemCache, MemoryCache, RedisCache};
use items_api::config::{CacheBackendKind, StoreBackend};
use items_api::store::{ItemStore, MemoryItemStore, PgItemStore};
use items_api::{api::cors_layer, create_router, spawn_cleanup_task, AppState, Config, ItemService};

/// Main entry point for the items server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the cache, then the store; either failure aborts startup
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM, then close the store
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "items_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting items server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: store={:?}, cache={:?}, cache_ttl={}s, port={}",
        config.store_backend, config.cache_backend, config.cache_ttl, config.server_port
    );

    let (cache, cleanup_handle) = connect_cache(&config).await?;
    let store = connect_store(&config).await?;

    let cors_origin = HeaderValue::from_str(&config.cors_origin)
        .with_context(|| format!("invalid CORS origin: {}", config.cors_origin))?;

    let service = ItemService::new(Arc::clone(&store), cache);
    let state = AppState::new(service).with_lookup(config.cache_lookup);
    if state.items.has_cache() && !state.serve_lookup {
        info!("Lookup by id disabled, cache is write-only");
    }
    let app = create_router(state, cors_layer(cors_origin));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn connect_cache(
    config: &Config,
) -> anyhow::Result<(Option<ItemCache>, Option<JoinHandle<()>>)> {
    let ttl = config.cache_ttl();

    match config.cache_backend {
        CacheBackendKind::Redis => {
            let redis = RedisCache::connect(&config.redis_url)
                .await
                .context("Unable to connect to redis")?;
            Ok((Some(ItemCache::new(Arc::new(redis), ttl)), None))
        }
        CacheBackendKind::Memory => {
            let memory = MemoryCache::new();
            let handle = spawn_cleanup_task(memory.store(), config.cleanup_interval);
            info!("In-memory cache initialized");
            Ok((Some(ItemCache::new(Arc::new(memory), ttl)), Some(handle)))
        }
        CacheBackendKind::Disabled => {
            info!("Cache disabled, lookup by id is not routed");
            Ok((None, None))
        }
    }
}

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn ItemStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let Some(url) = config.database_url.as_deref() else {
                bail!("DATABASE_URL must be set for the postgres store");
            };
            let store = PgItemStore::connect(url, config.db_max_connections)
                .await
                .context("Unable to connect to database")?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store, items are lost on restart");
            Ok(Arc::new(MemoryItemStore::new()))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
