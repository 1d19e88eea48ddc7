use crate::{
    abstract_trait::bank_account::repository::command::BankAccountCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{NewBankAccount, UpdateBotStatus},
    errors::RepositoryError,
    model::BankAccountModel,
    repository::{bank_account::query::ACCOUNT_SELECT, db_error},
    utils::local_now,
};
use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::{error, info};

pub struct BankAccountCommandRepository {
    db: ConnectionPool,
}

impl BankAccountCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn get_conn(
        &self,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, RepositoryError> {
        self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })
    }
}

async fn reset_main_withdraw(
    conn: &mut PgConnection,
    keep_id: Option<i64>,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"
        UPDATE bank_accounts SET is_main_withdraw = FALSE, updated_at = $2
        WHERE is_main_withdraw AND deleted_at IS NULL
          AND ($1::BIGINT IS NULL OR id <> $1)
        "#,
    )
    .bind(keep_id)
    .bind(local_now())
    .execute(&mut *conn)
    .await
    .map_err(db_error("reset main withdraw account"))?;

    Ok(())
}

async fn select_by_id(
    conn: &mut PgConnection,
    id: i64,
) -> Result<BankAccountModel, RepositoryError> {
    let sql = format!("{ACCOUNT_SELECT} WHERE a.id = $1");

    sqlx::query_as::<_, BankAccountModel>(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(db_error("reload bank account"))
}

#[async_trait]
impl BankAccountCommandRepositoryTrait for BankAccountCommandRepository {
    async fn create(&self, req: &NewBankAccount) -> Result<BankAccountModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(db_error("begin create account"))?;

        if req.is_main_withdraw {
            reset_main_withdraw(&mut tx, None).await?;
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bank_accounts (
                bank_id, account_number, account_name, account_type_id,
                device_uid, pin_code, external_id,
                auto_credit_flag, auto_withdraw_flag,
                auto_withdraw_credit_flag, auto_withdraw_confirm_flag,
                is_main_withdraw, auto_withdraw_max_amount, auto_transfer_max_amount,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(req.bank_id)
        .bind(&req.account_number)
        .bind(&req.account_name)
        .bind(req.account_type_id)
        .bind(&req.device_uid)
        .bind(&req.pin_code)
        .bind(req.external_id)
        .bind(&req.auto_credit_flag)
        .bind(&req.auto_withdraw_flag)
        .bind(&req.auto_withdraw_credit_flag)
        .bind(&req.auto_withdraw_confirm_flag)
        .bind(req.is_main_withdraw)
        .bind(req.auto_withdraw_max_amount)
        .bind(req.auto_transfer_max_amount)
        .bind(local_now())
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("insert bank account"))?;

        let account = select_by_id(&mut tx, id).await?;

        tx.commit().await.map_err(db_error("commit create account"))?;

        info!("✅ Created bank account {} ({})", account.id, account.account_number);

        Ok(account)
    }

    async fn update(
        &self,
        id: i64,
        req: &NewBankAccount,
    ) -> Result<BankAccountModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(db_error("begin update account"))?;

        if req.is_main_withdraw {
            reset_main_withdraw(&mut tx, Some(id)).await?;
        }

        let result = sqlx::query(
            r#"
            UPDATE bank_accounts SET
                bank_id = $2,
                account_number = $3,
                account_name = $4,
                account_type_id = $5,
                device_uid = $6,
                pin_code = $7,
                external_id = $8,
                auto_credit_flag = $9,
                auto_withdraw_flag = $10,
                auto_withdraw_credit_flag = $11,
                auto_withdraw_confirm_flag = $12,
                is_main_withdraw = $13,
                auto_withdraw_max_amount = $14,
                auto_transfer_max_amount = $15,
                updated_at = $16
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(req.bank_id)
        .bind(&req.account_number)
        .bind(&req.account_name)
        .bind(req.account_type_id)
        .bind(&req.device_uid)
        .bind(&req.pin_code)
        .bind(req.external_id)
        .bind(&req.auto_credit_flag)
        .bind(&req.auto_withdraw_flag)
        .bind(&req.auto_withdraw_credit_flag)
        .bind(&req.auto_withdraw_confirm_flag)
        .bind(req.is_main_withdraw)
        .bind(req.auto_withdraw_max_amount)
        .bind(req.auto_transfer_max_amount)
        .bind(local_now())
        .execute(&mut *tx)
        .await
        .map_err(db_error("update bank account"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let account = select_by_id(&mut tx, id).await?;

        tx.commit().await.map_err(db_error("commit update account"))?;

        Ok(account)
    }

    async fn set_external(
        &self,
        id: i64,
        external_id: Option<i64>,
        pin_code: Option<String>,
    ) -> Result<BankAccountModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let result = sqlx::query(
            r#"
            UPDATE bank_accounts
            SET external_id = $2, pin_code = COALESCE($3, pin_code), updated_at = $4
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(external_id)
        .bind(pin_code)
        .bind(local_now())
        .execute(&mut *conn)
        .await
        .map_err(db_error("set external account"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        select_by_id(&mut conn, id).await
    }

    async fn update_bot_status(&self, req: &UpdateBotStatus) -> Result<(), RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query(
            r#"
            UPDATE bank_accounts SET
                connection_status = $2,
                account_balance = COALESCE($3, account_balance),
                last_conn_update_at = $4
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(req.id)
        .bind(req.connection_status.as_str())
        .bind(req.account_balance)
        .bind(req.last_conn_update_at)
        .execute(&mut *conn)
        .await
        .map_err(db_error("update bot status"))?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<BankAccountModel, RepositoryError> {
        let mut conn = self.get_conn().await?;
        let now = local_now();

        let result = sqlx::query(
            r#"
            UPDATE bank_accounts SET
                account_number = account_number || '_del' || id::TEXT,
                is_main_withdraw = FALSE,
                updated_at = $2,
                deleted_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(db_error("delete bank account"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted bank account {id}");

        select_by_id(&mut conn, id).await
    }
}
