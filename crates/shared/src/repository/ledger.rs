use crate::{
    domain::requests::CreditMove, errors::RepositoryError, model::MemberStatementModel,
    repository::db_error, utils::local_now,
};
use sqlx::PgConnection;

/// Appends one ledger row and moves the member's credit by the same signed amount.
///
/// Must run inside the caller's transaction; the member row is locked until it commits.
pub(crate) async fn apply_credit_move(
    conn: &mut PgConnection,
    mv: &CreditMove,
) -> Result<MemberStatementModel, RepositoryError> {
    if mv.amount.is_nan() || mv.amount <= 0.0 {
        return Err(RepositoryError::Custom(format!(
            "credit amount must be positive, got {}",
            mv.amount
        )));
    }

    let credit: f64 = sqlx::query_scalar(
        "SELECT credit FROM users WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
    )
    .bind(mv.user_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error("lock member credit"))?
    .ok_or(RepositoryError::NotFound)?;

    let delta = mv.statement_type.signed(mv.amount);
    if delta < 0.0 && mv.amount > credit {
        return Err(RepositoryError::InsufficientCredit {
            available: credit,
            requested: mv.amount,
        });
    }

    let after = credit + delta;
    let now = local_now();

    let row = sqlx::query_as::<_, MemberStatementModel>(
        r#"
        INSERT INTO member_statements (
            user_id, statement_type, transfer_at, info,
            before_balance, amount, after_balance, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(mv.user_id)
    .bind(mv.statement_type.as_str())
    .bind(mv.transfer_at)
    .bind(&mv.info)
    .bind(credit)
    .bind(delta)
    .bind(after)
    .bind(now)
    .fetch_one(&mut *conn)
    .await
    .map_err(db_error("insert member statement"))?;

    sqlx::query("UPDATE users SET credit = $2, updated_at = $3 WHERE id = $1")
        .bind(mv.user_id)
        .bind(after)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(db_error("update member credit"))?;

    Ok(row)
}
