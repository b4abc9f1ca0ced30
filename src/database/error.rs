use error_stack::Report;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
    /// An error caused by an invalid Postgres connection url.
    #[error("invalid connection url")]
    InvalidUrl,
    /// An unexpected error caused by [`sqlx`].
    #[error("received an unexpected database error")]
    Internal,
    /// A unique constraint rejected the row. For users, it only
    /// happens if the email address is already taken.
    #[error("unique constraint violated")]
    UniqueViolation,
    /// A not-null, check or length constraint rejected the row.
    #[error("constraint violated")]
    ConstraintViolation,
    /// The database pool does not have reliable connection to
    /// transact to the database.
    #[error("unhealthy database pool")]
    UnhealthyPool,
    /// The operation took longer than the configured query timeout.
    #[error("database operation timed out")]
    Timeout,
}

/// Converts from a generic [sqlx] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
    fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn into_db_error(self) -> Result<T> {
        self.map_err(|e| {
            let context = classify(&e);
            Report::new(e).change_context(context)
        })
    }
}

// SQLSTATE for values that do not fit in their column, e.g.
// a string longer than `VARCHAR(n)`.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

fn classify(error: &sqlx::Error) -> Error {
    match error {
        sqlx::Error::Database(err) => match err.kind() {
            ErrorKind::UniqueViolation => Error::UniqueViolation,
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => Error::ConstraintViolation,
            _ if err.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) => {
                Error::ConstraintViolation
            }
            _ => Error::Internal,
        },
        sqlx::Error::Io(..)
        | sqlx::Error::Tls(..)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => Error::UnhealthyPool,
        _ => Error::Internal,
    }
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// This trait deals with `error_stack::Report<Error>` because it is
/// annoying to inspect the kind of database error whenever it
/// is wrapped in a report.
pub trait ReportExt {
    fn is_unhealthy(&self) -> bool;
}

impl ReportExt for Report<Error> {
    fn is_unhealthy(&self) -> bool {
        matches!(
            self.current_context(),
            Error::UnhealthyPool | Error::Timeout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn into_report(error: sqlx::Error) -> Report<Error> {
        Err::<(), _>(error).into_db_error().unwrap_err()
    }

    #[test]
    fn pool_failures_are_unhealthy() {
        assert!(into_report(sqlx::Error::PoolTimedOut).is_unhealthy());
        assert!(into_report(sqlx::Error::PoolClosed).is_unhealthy());

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(into_report(sqlx::Error::Io(io)).is_unhealthy());
    }

    #[test]
    fn other_failures_are_internal() {
        let report = into_report(sqlx::Error::RowNotFound);
        assert!(matches!(report.current_context(), Error::Internal));
        assert!(!report.is_unhealthy());
    }

    #[test]
    fn keeps_sqlx_error_in_report() {
        let report = into_report(sqlx::Error::PoolTimedOut);
        assert!(report.downcast_ref::<sqlx::Error>().is_some());
    }
}
