pub mod bank;
pub mod bank_account;
pub mod bot_config;
pub mod ledger;
pub mod member;
pub mod member_credit;
pub mod statement;
pub mod transaction;
pub mod webhook_log;

use crate::errors::RepositoryError;
use sqlx::{FromRow, postgres::PgRow};
use tracing::error;

/// Logs a database failure with its call site and converts it.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| {
        if !matches!(e, sqlx::Error::RowNotFound) {
            error!("❌ Database error in {context}: {e:?}");
        }
        RepositoryError::from(e)
    }
}

/// Splits a `COUNT(*) OVER() AS total_count` result into rows and the total.
pub(crate) fn with_total<T>(rows: Vec<PgRow>) -> Result<(Vec<T>, i64), RepositoryError>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    use sqlx::Row;

    let total = match rows.first() {
        Some(row) => row.try_get::<i64, _>("total_count")?,
        None => 0,
    };

    let items = rows
        .iter()
        .map(T::from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((items, total))
}
