use error_stack::{Report, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;

use super::ParseError;
use crate::util::figment::FigmentErrorAttachable;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    /// IP address where the HTTP server binds to.
    ///
    /// **Environment variables**:
    /// - `USER_SERVICE_IP`
    pub ip: IpAddr,
    /// Port where the HTTP server listens to.
    ///
    /// **Environment variables**:
    /// - `USER_SERVICE_PORT` or `PORT`
    pub port: u16,
    /// Amount of HTTP worker threads.
    ///
    /// **Environment variables**:
    /// - `USER_SERVICE_WORKERS`
    pub workers: NonZeroUsize,
    pub db: super::Database,
    pub logging: super::Logging,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();
        Self::from_figment(&Self::figment())
    }

    pub(crate) fn from_figment(figment: &figment::Figment) -> Result<Self, ParseError> {
        let config = figment
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config.db.validate()?;
        Ok(config)
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "user-service.toml";
    const DEFAULT_PORT: u16 = 5000;

    /// Creates a default [`Figment`] object to load server
    /// configuration. This function is there for implementing
    /// [`Server::load`] and testing.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // One big con about figment (env provider to be specific) especially
            // these fields with underscore in it.
            .merge(Env::prefixed("USER_SERVICE_").map(|v| match v.as_str() {
                "DB_MIN_IDLE" => "db.min_idle".into(),
                "DB_POOL_SIZE" => "db.pool_size".into(),
                "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),
                "DB_QUERY_TIMEOUT_SECS" => "db.query_timeout_secs".into(),

                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(Env::raw().only(&["DATABASE_URL", "PORT"]).map(|v| {
                match v.as_str() {
                    "DATABASE_URL" => "db.url".into(),
                    _ => v.as_str().to_lowercase().into(),
                }
            }))
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: Self::DEFAULT_PORT,
            workers: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            db: super::Database::default(),
            logging: super::Logging::default(),
        }
    }
}
