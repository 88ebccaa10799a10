//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL;

/// Origin allowed by the CORS policy unless overridden.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Cache address used by the container deployment.
pub const DEFAULT_REDIS_URL: &str = "redis://redis:6379";

// == Store Backend ==
/// Where items are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL reached through `DATABASE_URL`
    Postgres,
    /// Process-local table, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

// == Cache Backend ==
/// Which cache mirrors item writes, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    Redis,
    Memory,
    /// No cache: writes go to the store only and lookup by id is not routed
    Disabled,
}

impl FromStr for CacheBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            "disabled" | "none" | "off" => Ok(Self::Disabled),
            other => Err(format!("unknown cache backend: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Postgres connection string
    pub database_url: Option<String>,
    /// Store implementation
    pub store_backend: StoreBackend,
    /// Upper bound on pooled database connections
    pub db_max_connections: u32,
    /// Cache implementation
    pub cache_backend: CacheBackendKind,
    /// Redis connection string
    pub redis_url: String,
    /// TTL in seconds applied to every cached item, never 0
    pub cache_ttl: u64,
    /// Whether GET /api/items/get is routed when a cache is configured
    pub cache_lookup: bool,
    /// Memory-cache sweep interval in seconds
    pub cleanup_interval: u64,
    /// Single origin allowed by CORS
    pub cors_origin: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `DATABASE_URL` - Postgres connection string (no default)
    /// - `STORE_BACKEND` - `postgres` or `memory` (default: postgres)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `CACHE_BACKEND` - `redis`, `memory` or `disabled` (default: redis)
    /// - `REDIS_URL` - Redis connection string (default: redis://redis:6379)
    /// - `CACHE_TTL` - Cache entry TTL in seconds; 0 falls back to the default (default: 600)
    /// - `CACHE_LOOKUP` - Route lookup by id when cached (default: true)
    /// - `CLEANUP_INTERVAL` - Memory-cache sweep frequency in seconds (default: 1)
    /// - `CORS_ALLOWED_ORIGIN` - Allowed origin (default: http://localhost:3000)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any variable source; unset or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            server_port: parse_var(&lookup, "SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            store_backend: parse_var(&lookup, "STORE_BACKEND").unwrap_or(defaults.store_backend),
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            cache_backend: parse_var(&lookup, "CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_ttl: parse_var(&lookup, "CACHE_TTL")
                .filter(|ttl: &u64| *ttl > 0)
                .unwrap_or(defaults.cache_ttl),
            cache_lookup: parse_var(&lookup, "CACHE_LOOKUP").unwrap_or(defaults.cache_lookup),
            cleanup_interval: parse_var(&lookup, "CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            cors_origin: lookup("CORS_ALLOWED_ORIGIN").unwrap_or(defaults.cors_origin),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            database_url: None,
            store_backend: StoreBackend::Postgres,
            db_max_connections: 5,
            cache_backend: CacheBackendKind::Redis,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            cache_ttl: DEFAULT_TTL.as_secs(),
            cache_lookup: true,
            cleanup_interval: 1,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

fn parse_var<T: FromStr>(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|v| v.trim().parse().ok())
}
