use error_stack::{Result, ResultExt};
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

use crate::{
    config,
    database::{self, PgUserGateway, UserGateway},
};

/// Shared state of every request handler.
///
/// It is built once when the server starts and handed to each
/// worker through [`actix_web::web::Data`].
#[derive(Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub users: Arc<dyn UserGateway>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    #[tracing::instrument(skip_all, name = "app.new")]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let pool = database::Pool::new(&cfg.db)
            .await
            .change_context(AppError)?;

        let users = PgUserGateway::new(pool, cfg.db.query_timeout());
        Ok(Self::with_gateway(cfg, Arc::new(users)))
    }

    /// Creates an [`App`] with any [`UserGateway`] implementation.
    #[must_use]
    pub fn with_gateway(cfg: config::Server, users: Arc<dyn UserGateway>) -> Self {
        Self {
            config: Arc::new(cfg),
            users,
        }
    }
}

impl Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(App: Clone, Debug, Send, Sync);
}
