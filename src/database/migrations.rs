use tokio::time::Instant;
use tracing::info;

use super::{error::ErrorExt, Connection, Result};

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS "users" (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL CHECK (name <> ''),
    email VARCHAR(100) NOT NULL UNIQUE CHECK (email <> '')
)"#;

/// Creates the tables needed by the service if they do not exist yet.
///
/// It is safe to call this function every time the process starts.
#[tracing::instrument(skip_all, name = "db.init_schema")]
pub async fn init_schema(conn: &mut Connection) -> Result<()> {
    let now = Instant::now();
    info!("Ensuring database schema exists...");

    sqlx::query(CREATE_USERS_TABLE)
        .execute(conn)
        .await
        .into_db_error()?;

    let elapsed = now.elapsed();
    info!("Database schema is ready! took {elapsed:.2?}");

    Ok(())
}
