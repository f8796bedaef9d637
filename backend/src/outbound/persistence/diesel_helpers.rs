//! Shared helpers for the Diesel store adapters.
//!
//! - mapping pool and Diesel errors into [`StoreError`];
//! - bounding each operation with the pool's query timeout;
//! - interpreting affected-row counts and empty selections;
//! - converting stored ids and aggregate counts back into domain types.

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ValidationError;
use crate::domain::ports::StoreError;

use super::pool::PoolError;

/// Map pool failures; the pool never reports constraint violations.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    warn!(%message, "database pool unavailable");
    StoreError::unknown(format!("database pool unavailable: {message}"))
}

/// Translate a Diesel error raised while performing `operation`.
///
/// Unique and foreign key violations keep the constraint name reported by
/// PostgreSQL. `NotFound` becomes [`StoreError::EmptySelection`].
pub(crate) fn map_diesel_error(error: DieselError, operation: &'static str) -> StoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => StoreError::empty_selection(),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::constraint_unique(info.constraint_name().unwrap_or("unique"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StoreError::constraint_foreign_key(info.constraint_name().unwrap_or("foreign_key"))
        }
        DieselError::DatabaseError(kind, info) => {
            warn!(?kind, message = info.message(), %operation, "unrecognised database error");
            StoreError::unknown(format!("{operation}: {}", info.message()))
        }
        other => {
            warn!(error = %other, %operation, "unexpected diesel failure");
            StoreError::unknown(format!("{operation}: {other}"))
        }
    }
}

/// Run `operation` under `limit`, normally the pool's query timeout.
///
/// The bound covers connection checkout and every statement the future
/// awaits. Expiry surfaces as [`StoreError::Unknown`].
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    future: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            warn!(%operation, timeout_ms = limit.as_millis(), "store operation timed out");
            Err(StoreError::unknown(format!(
                "{operation} timed out after {} ms",
                limit.as_millis()
            )))
        }
    }
}

/// Treat a zero affected-row count as [`StoreError::NoRowsAffected`].
pub(crate) fn expect_affected(rows: usize) -> Result<(), StoreError> {
    if rows == 0 {
        return Err(StoreError::no_rows_affected());
    }
    Ok(())
}

/// Treat an empty list read as [`StoreError::EmptySelection`].
pub(crate) fn expect_rows<T>(rows: Vec<T>) -> Result<Vec<T>, StoreError> {
    if rows.is_empty() {
        return Err(StoreError::empty_selection());
    }
    Ok(rows)
}

/// Convert an aggregate `COUNT(*)` into a domain counter.
pub(crate) fn count(raw: i64, column: &'static str) -> Result<u64, StoreError> {
    u64::try_from(raw).map_err(|_| StoreError::unknown(format!("negative {column} count: {raw}")))
}

/// Convert a stored value that failed domain validation.
pub(crate) fn corrupt_row(table: &'static str, err: ValidationError) -> StoreError {
    warn!(%table, error = %err, "stored row failed domain validation");
    StoreError::unknown(format!("invalid row in {table}: {err}"))
}
