use crate::{
    abstract_trait::transaction::repository::command::BankTransactionCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{Actor, NewBankTransaction, NewTransactionAction, TransactionStep},
    errors::RepositoryError,
    model::{ActionKey, BankTransactionModel, TransactionActionModel},
    repository::{db_error, ledger::apply_credit_move},
    utils::local_now,
};
use async_trait::async_trait;
use tracing::{error, info, warn};

pub struct BankTransactionCommandRepository {
    db: ConnectionPool,
}

impl BankTransactionCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BankTransactionCommandRepositoryTrait for BankTransactionCommandRepository {
    async fn create(
        &self,
        req: &NewBankTransaction,
    ) -> Result<BankTransactionModel, RepositoryError> {
        let from = req.from_account.as_ref();
        let to = req.to_account.as_ref();

        let transaction = sqlx::query_as::<_, BankTransactionModel>(
            r#"
            INSERT INTO bank_transactions (
                user_id, member_code, transfer_type,
                credit_amount, bonus_amount, bank_charge_amount,
                from_account_id, from_bank_id, from_account_name, from_account_number,
                to_account_id, to_bank_id, to_account_name, to_account_number,
                statement_id, slip_url, status, is_auto_credit, transfer_at,
                created_by_user_id, created_by_username, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22
            )
            RETURNING *
            "#,
        )
        .bind(req.user_id)
        .bind(&req.member_code)
        .bind(req.transfer_type.as_str())
        .bind(req.credit_amount)
        .bind(req.bonus_amount)
        .bind(req.bank_charge_amount)
        .bind(from.and_then(|a| a.account_id))
        .bind(from.and_then(|a| a.bank_id))
        .bind(from.and_then(|a| a.account_name.clone()))
        .bind(from.and_then(|a| a.account_number.clone()))
        .bind(to.and_then(|a| a.account_id))
        .bind(to.and_then(|a| a.bank_id))
        .bind(to.and_then(|a| a.account_name.clone()))
        .bind(to.and_then(|a| a.account_number.clone()))
        .bind(req.statement_id)
        .bind(&req.slip_url)
        .bind(req.status.as_str())
        .bind(req.is_auto_credit)
        .bind(req.transfer_at)
        .bind(req.created_by.id)
        .bind(&req.created_by.username)
        .bind(local_now())
        .fetch_one(&self.db)
        .await
        .map_err(db_error("insert transaction"))?;

        info!(
            "✅ Created {} transaction {} for {} amount {}",
            transaction.transfer_type, transaction.id, transaction.member_code, transaction.credit_amount
        );

        Ok(transaction)
    }

    async fn create_action(
        &self,
        req: &NewTransactionAction,
    ) -> Result<TransactionActionModel, RepositoryError> {
        let now = local_now();

        let action = sqlx::query_as::<_, TransactionActionModel>(
            r#"
            INSERT INTO bank_transaction_actions (
                action_key, transaction_id, user_id, transfer_type,
                from_account_id, to_account_id, json_before, transfer_at,
                credit_amount, bonus_amount, bank_charge_amount, slip_url,
                confirmed_at, confirmed_by_user_id, confirmed_by_username, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $13)
            RETURNING *
            "#,
        )
        .bind(&req.action_key)
        .bind(req.transaction_id)
        .bind(req.user_id)
        .bind(req.transfer_type.as_str())
        .bind(req.from_account_id)
        .bind(req.to_account_id)
        .bind(&req.json_before)
        .bind(req.transfer_at)
        .bind(req.credit_amount)
        .bind(req.bonus_amount)
        .bind(req.bank_charge_amount)
        .bind(&req.slip_url)
        .bind(now)
        .bind(req.confirmed_by.id)
        .bind(&req.confirmed_by.username)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            let err = RepositoryError::from(e);
            if err.is_duplicate() {
                warn!("action {} already recorded", req.action_key);
            } else {
                error!("❌ Database error in insert transaction action: {err:?}");
            }
            err
        })?;

        Ok(action)
    }

    async fn rollback_action(&self, action_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE bank_transaction_actions
            SET action_key = $2, deleted_at = $3
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(action_id)
        .bind(ActionKey::rollback(action_id))
        .bind(local_now())
        .execute(&self.db)
        .await
        .map_err(db_error("rollback transaction action"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        warn!("↩️ Rolled back transaction action {action_id}");

        Ok(())
    }

    async fn mark_action_paid(&self, action_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE bank_transaction_actions
            SET paid_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(action_id)
        .bind(local_now())
        .execute(&self.db)
        .await
        .map_err(db_error("mark transaction action paid"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("💰 Payout recorded on transaction action {action_id}");

        Ok(())
    }

    async fn apply_step(
        &self,
        step: &TransactionStep,
    ) -> Result<BankTransactionModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(db_error("begin transaction step"))?;

        let current = sqlx::query_as::<_, BankTransactionModel>(
            r#"
            SELECT * FROM bank_transactions
            WHERE id = $1 AND deleted_at IS NULL AND removed_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(step.transaction_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("lock transaction"))?;

        step.check(&current)?;

        let mut balances: Option<(f64, f64)> = None;
        for mv in &step.credit_moves {
            let row = apply_credit_move(&mut tx, mv).await?;
            balances = Some(match balances {
                Some((before, _)) => (before, row.after_balance),
                None => (row.before_balance, row.after_balance),
            });
        }

        let next = step.apply_to(&current, balances, local_now());

        let updated = sqlx::query_as::<_, BankTransactionModel>(
            r#"
            UPDATE bank_transactions SET
                status = $3,
                before_amount = $4,
                after_amount = $5,
                bonus_amount = $6,
                bank_charge_amount = $7,
                from_account_id = $8,
                from_bank_id = $9,
                from_account_name = $10,
                from_account_number = $11,
                slip_url = $12,
                cancel_remark = $13,
                transfer_at = $14,
                confirmed_at = $15,
                confirmed_by_user_id = $16,
                confirmed_by_username = $17,
                canceled_at = $18,
                canceled_by_user_id = $19,
                canceled_by_username = $20,
                updated_at = $21
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(step.expected_status.as_str())
        .bind(&next.status)
        .bind(next.before_amount)
        .bind(next.after_amount)
        .bind(next.bonus_amount)
        .bind(next.bank_charge_amount)
        .bind(next.from_account_id)
        .bind(next.from_bank_id)
        .bind(&next.from_account_name)
        .bind(&next.from_account_number)
        .bind(&next.slip_url)
        .bind(&next.cancel_remark)
        .bind(next.transfer_at)
        .bind(next.confirmed_at)
        .bind(next.confirmed_by_user_id)
        .bind(&next.confirmed_by_username)
        .bind(next.canceled_at)
        .bind(next.canceled_by_user_id)
        .bind(&next.canceled_by_username)
        .bind(next.updated_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("update transaction status"))?
        .ok_or_else(|| {
            RepositoryError::Conflict(format!(
                "transaction {} left {} concurrently",
                current.id, step.expected_status
            ))
        })?;

        tx.commit().await.map_err(db_error("commit transaction step"))?;

        info!(
            "✅ Transaction {} {} -> {}",
            updated.id, step.expected_status, updated.status
        );

        Ok(updated)
    }

    async fn remove(&self, id: i64, actor: &Actor) -> Result<BankTransactionModel, RepositoryError> {
        let transaction = sqlx::query_as::<_, BankTransactionModel>(
            r#"
            UPDATE bank_transactions SET
                removed_at = $2,
                removed_by_user_id = $3,
                removed_by_username = $4,
                updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL AND removed_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(local_now())
        .bind(actor.id)
        .bind(&actor.username)
        .fetch_one(&self.db)
        .await
        .map_err(db_error("remove transaction"))?;

        info!("🗑️ Transaction {id} removed by {}", actor.username);

        Ok(transaction)
    }
}
