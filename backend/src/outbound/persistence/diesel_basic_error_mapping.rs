//! Diesel and pool failures mapped onto port error enums.
//!
//! Every port error generated by `define_port_error!` has `Connection` and
//! `Query` variants; adapters pass those constructors in.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Pool failures always mean the database is unreachable.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(%error, "connection pool failure");
    connection(error.message().to_owned())
}

/// Classify a Diesel failure as a connection or a query problem.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced user does not exist")
        }
        DieselError::NotFound => query("record not found"),
        _ => query("database error"),
    }
}
