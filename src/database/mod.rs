use error_stack::ResultExt;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use tracing::warn;

use crate::config;

pub mod error;
mod gateway;
mod migrations;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, ErrorExt, ReportExt, Result};
pub use gateway::{PgUserGateway, UserGateway};
pub use migrations::init_schema;

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;
pub type Connection = sqlx::PgConnection;

#[derive(Clone)]
pub struct Pool {
    pool: sqlx::PgPool,
}

impl Pool {
    /// Builds a lazily connected pool.
    ///
    /// An unreachable database does not make this function fail,
    /// the pool will keep trying to connect whenever a connection
    /// is requested.
    #[tracing::instrument(skip_all, name = "db.pool.new")]
    pub async fn new(cfg: &config::Database) -> Result<Self> {
        let mut pool_opts = PgPoolOptions::new()
            .acquire_timeout(cfg.timeout())
            .max_connections(cfg.pool_size.get());

        if let Some(min_idle) = cfg.min_idle {
            pool_opts = pool_opts.min_connections(min_idle.get());
        }

        let mut connect_opts =
            PgConnectOptions::from_str(cfg.url.as_str()).change_context(Error::InvalidUrl)?;

        if cfg.enforce_tls {
            connect_opts = connect_opts.ssl_mode(PgSslMode::Require);
        }

        let pool = Self {
            pool: pool_opts.connect_lazy_with(connect_opts),
        };

        match pool.wait_until_healthy().await {
            Ok(..) => {}
            Err(err) if err.is_unhealthy() => {
                warn!(error = ?err, "Database is not reachable yet");
            }
            Err(err) => return Err(err),
        }

        Ok(pool)
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pool.fmt(f)
    }
}

impl Pool {
    #[tracing::instrument(name = "db.connect", skip(self))]
    pub async fn get(&self) -> Result<PoolConnection> {
        self.pool.acquire().await.into_db_error()
    }

    #[tracing::instrument(skip(self))]
    pub async fn wait_until_healthy(&self) -> Result<()> {
        self.get().await.map(drop)
    }
}
