use crate::{
    abstract_trait::statement::repository::command::BankStatementCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{NewBankStatement, StatementTransition},
    errors::RepositoryError,
    model::{BankStatementModel, StatementStatus},
    repository::db_error,
    utils::local_now,
};
use async_trait::async_trait;
use tracing::info;

pub struct BankStatementCommandRepository {
    db: ConnectionPool,
}

impl BankStatementCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BankStatementCommandRepositoryTrait for BankStatementCommandRepository {
    async fn create(&self, req: &NewBankStatement) -> Result<BankStatementModel, RepositoryError> {
        let statement = sqlx::query_as::<_, BankStatementModel>(
            r#"
            INSERT INTO bank_statements (
                account_id, external_id, detail, statement_type, amount,
                transfer_at, from_bank_id, from_account_number, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(req.account_id)
        .bind(req.external_id)
        .bind(&req.detail)
        .bind(req.statement_type.as_str())
        .bind(req.amount)
        .bind(req.transfer_at)
        .bind(req.from_bank_id)
        .bind(&req.from_account_number)
        .bind(StatementStatus::Pending.as_str())
        .bind(local_now())
        .fetch_one(&self.db)
        .await
        .map_err(db_error("insert statement"))?;

        info!(
            "✅ Stored statement {} (external {}) amount {}",
            statement.id, statement.external_id, statement.amount
        );

        Ok(statement)
    }

    async fn transition(
        &self,
        req: &StatementTransition,
    ) -> Result<BankStatementModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(db_error("begin statement transition"))?;

        let current = sqlx::query_as::<_, BankStatementModel>(
            "SELECT * FROM bank_statements WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(req.statement_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("lock statement"))?;

        if current.status != StatementStatus::Pending.as_str() {
            return Err(RepositoryError::Conflict(format!(
                "statement {} is already {}",
                current.id, current.status
            )));
        }

        let json_before = serde_json::to_value(&current)
            .map_err(|e| RepositoryError::Custom(format!("serialize statement: {e}")))?;
        let now = local_now();

        sqlx::query(
            r#"
            INSERT INTO bank_statement_actions (
                statement_id, user_id, action_type, json_before,
                confirmed_at, confirmed_by_user_id, confirmed_by_username
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(req.statement_id)
        .bind(req.user_id)
        .bind(req.action_type.as_str())
        .bind(&json_before)
        .bind(now)
        .bind(req.actor.id)
        .bind(&req.actor.username)
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert statement action"))?;

        let statement = sqlx::query_as::<_, BankStatementModel>(
            r#"
            UPDATE bank_statements SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(req.statement_id)
        .bind(req.next_status.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("update statement status"))?;

        tx.commit().await.map_err(db_error("commit statement transition"))?;

        info!(
            "✅ Statement {} -> {} by {}",
            statement.id, statement.status, req.actor.username
        );

        Ok(statement)
    }
}
