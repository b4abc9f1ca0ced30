use async_trait::async_trait;
use error_stack::Report;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::{Error, Result, UserGateway};
use crate::schema::{NewUser, User};
use crate::types::id::{marker::UserMarker, Id};

/// In-memory [`UserGateway`] that mimics the constraints of the
/// Postgres schema. It can also pretend that the database is down.
#[derive(Debug, Default)]
pub struct MemoryUserGateway {
    users: Mutex<Vec<User>>,
    unavailable: AtomicBool,
}

impl MemoryUserGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(Report::new(Error::UnhealthyPool).attach_printable("simulated outage"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserGateway for MemoryUserGateway {
    async fn init_schema(&self) -> Result<()> {
        self.check_available()
    }

    async fn insert(&self, user: &NewUser) -> Result<User> {
        self.check_available()?;
        if user.name.is_empty()
            || user.email.is_empty()
            || user.name.chars().count() > NewUser::MAX_NAME_LEN
            || user.email.chars().count() > NewUser::MAX_EMAIL_LEN
        {
            return Err(Report::new(Error::ConstraintViolation));
        }

        let mut users = self.users.lock().unwrap();
        if users.iter().any(|v| v.email == user.email) {
            return Err(Report::new(Error::UniqueViolation));
        }

        let next_id = users.last().map_or(1, |v| v.id.get() + 1);
        let user = User {
            id: Id::new(next_id),
            name: user.name.clone(),
            email: user.email.clone(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: Id<UserMarker>) -> Result<Option<User>> {
        self.check_available()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|v| v.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_values_the_schema_would_reject() {
        let gateway = MemoryUserGateway::new();
        let form = NewUser {
            name: "a".repeat(NewUser::MAX_NAME_LEN + 1),
            email: "alice@example.com".into(),
        };

        let error = gateway.insert(&form).await.unwrap_err();
        assert!(matches!(error.current_context(), Error::ConstraintViolation));
        assert!(gateway.list_all().await.unwrap().is_empty());
    }
}
