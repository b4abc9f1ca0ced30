use serde::Serialize;
use sqlx::FromRow;

use crate::{
    database::{error::ErrorExt, Connection, Result},
    types::id::{marker::UserMarker, Id},
};

/// A stored user. Its serialized form is the public
/// representation of the user: `{"id", "name", "email"}`.
#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Id<UserMarker>,
    pub name: String,
    pub email: String,
}

/// A validated user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Matches `VARCHAR(100)` of the `name` column.
    pub const MAX_NAME_LEN: usize = 100;
    /// Matches `VARCHAR(100)` of the `email` column.
    pub const MAX_EMAIL_LEN: usize = 100;
}

impl User {
    #[tracing::instrument(skip(conn), name = "db.users.by_id")]
    pub async fn by_id(conn: &mut Connection, id: Id<UserMarker>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(r#"SELECT id, name, email FROM "users" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(conn)
            .await
            .into_db_error()
    }

    #[tracing::instrument(skip(conn), name = "db.users.list_all")]
    pub async fn list_all(conn: &mut Connection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(r#"SELECT id, name, email FROM "users" ORDER BY id ASC"#)
            .fetch_all(conn)
            .await
            .into_db_error()
    }

    #[tracing::instrument(skip_all, name = "db.users.insert")]
    pub async fn insert(conn: &mut Connection, form: &NewUser) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO "users" (name, email)
               VALUES ($1, $2)
               RETURNING id, name, email"#,
        )
        .bind(form.name.as_str())
        .bind(form.email.as_str())
        .fetch_one(conn)
        .await
        .into_db_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_representation() {
        let user = User {
            id: Id::new(1),
            name: "Alice".into(),
            email: "alice@example.com".into(),
        };

        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"id":1,"name":"Alice","email":"alice@example.com"}"#
        );
    }
}
