//! sqlx-to-domain error translation.

use club_core::error::DomainError;
use sqlx::Error as SqlxError;

pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Like [`map_db_error`], but a unique-constraint violation becomes the
/// supplied domain error instead. Repositories lean on this where the
/// schema backstops a race the service already checked for.
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => on_unique(),
        _ => DomainError::DatabaseError(e.to_string()),
    }
}
