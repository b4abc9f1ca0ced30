use async_trait::async_trait;
use error_stack::Report;
use std::future::Future;
use std::time::Duration;

use super::{Error, Pool, Result};
use crate::schema::{NewUser, User};
use crate::types::id::{marker::UserMarker, Id};

/// Storage of users, shared by every request handler.
#[async_trait]
pub trait UserGateway: Send + Sync + 'static {
    /// Makes sure the users table exists.
    async fn init_schema(&self) -> Result<()>;

    /// Stores a new user and returns it with its assigned ID.
    ///
    /// It fails with [`Error::UniqueViolation`] if the email
    /// address is already taken.
    async fn insert(&self, user: &NewUser) -> Result<User>;

    /// Absence of the user is not an error.
    async fn find_by_id(&self, id: Id<UserMarker>) -> Result<Option<User>>;

    /// Returns every user sorted by their ID.
    async fn list_all(&self) -> Result<Vec<User>>;
}

/// [`UserGateway`] backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgUserGateway {
    pool: Pool,
    query_timeout: Duration,
}

impl PgUserGateway {
    #[must_use]
    pub fn new(pool: Pool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T>(&self, future: impl Future<Output = Result<T>> + Send) -> Result<T> {
        match tokio::time::timeout(self.query_timeout, future).await {
            Ok(result) => result,
            Err(elapsed) => Err(Report::new(elapsed)
                .change_context(Error::Timeout)
                .attach_printable(format!("query timeout: {:?}", self.query_timeout))),
        }
    }
}

#[async_trait]
impl UserGateway for PgUserGateway {
    #[tracing::instrument(skip_all, name = "gateway.users.init_schema")]
    async fn init_schema(&self) -> Result<()> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            super::init_schema(&mut conn).await
        })
        .await
    }

    #[tracing::instrument(skip_all, name = "gateway.users.insert")]
    async fn insert(&self, user: &NewUser) -> Result<User> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            User::insert(&mut conn, user).await
        })
        .await
    }

    #[tracing::instrument(skip(self), name = "gateway.users.find_by_id")]
    async fn find_by_id(&self, id: Id<UserMarker>) -> Result<Option<User>> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            User::by_id(&mut conn, id).await
        })
        .await
    }

    #[tracing::instrument(skip_all, name = "gateway.users.list_all")]
    async fn list_all(&self) -> Result<Vec<User>> {
        self.bounded(async {
            let mut conn = self.pool.get().await?;
            User::list_all(&mut conn).await
        })
        .await
    }
}
