pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use std::time::Duration;

use agenda_core::errors::{AgendaError, AgendaResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

/// Sizing and timeout knobs for the single long-lived connection pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// Creates the process-wide connection pool. Acquired once at startup;
/// operations check connections out per call instead of reconnecting.
///
/// A failed connect is a configuration error: fatal to startup, surfaced
/// directly, never retried here.
pub async fn create_pool(database_url: &str, config: &PoolConfig) -> AgendaResult<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(database_url)
        .await
        .map_err(|err| {
            AgendaError::Configuration(format!("Failed to connect to database: {err}"))
        })?;

    Ok(pool)
}

/// Translates a sqlx error into the domain taxonomy.
///
/// Unique-constraint violations (SQLSTATE 23505) become `Conflict` so callers
/// can tell a lost slot race apart from an unavailable store.
pub(crate) fn store_error(err: sqlx::Error) -> AgendaError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return AgendaError::Conflict(db_err.message().to_string());
        }
    }
    AgendaError::Database(eyre::Report::new(err))
}
