//! Mapping of sqlx failures onto [`AppError`].

use netshare_core::error::{AppError, ErrorKind};

/// Whether the failure is a PostgreSQL unique-constraint violation (23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Map a failed write, turning unique violations into a conflict.
///
/// `conflict` is the client-facing message used when the row already exists.
pub(crate) fn write_error(
    message: &'static str,
    conflict: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if is_unique_violation(&e) {
            AppError::with_source(ErrorKind::Conflict, conflict, e)
        } else {
            AppError::with_source(ErrorKind::Database, message, e)
        }
    }
}
