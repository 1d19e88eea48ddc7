use crate::{
    abstract_trait::bank_account::repository::query::BankAccountQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllBankAccounts, SortSpec},
    errors::RepositoryError,
    model::BankAccountModel,
    repository::{db_error, with_total},
};
use async_trait::async_trait;
use tracing::{error, info};

pub(crate) const ACCOUNT_SELECT: &str = r#"
    SELECT a.*, b.code AS bank_code, b.name AS bank_name
    FROM bank_accounts a
    JOIN banks b ON b.id = a.bank_id
"#;

pub struct BankAccountQueryRepository {
    db: ConnectionPool,
}

impl BankAccountQueryRepository {
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

#[async_trait]
impl BankAccountQueryRepositoryTrait for BankAccountQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllBankAccounts,
    ) -> Result<(Vec<BankAccountModel>, i64), RepositoryError> {
        info!("🔍 Fetching bank accounts with search: {:?}", req.search);

        let mut conn = self.get_conn().await?;

        let sort = SortSpec::resolve(
            req.sort_col.as_deref(),
            req.sort_asc,
            req.page,
            req.limit,
            FindAllBankAccounts::SORT_COLUMNS,
        );

        let search = req
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let sql = format!(
            r#"
            SELECT a.*, b.code AS bank_code, b.name AS bank_name, COUNT(*) OVER() AS total_count
            FROM bank_accounts a
            JOIN banks b ON b.id = a.bank_id
            WHERE a.deleted_at IS NULL
              AND ($1::TEXT IS NULL OR a.account_number ILIKE '%' || $1 || '%'
                   OR a.account_name ILIKE '%' || $1 || '%')
              AND ($2::INT IS NULL OR a.account_type_id = $2)
              AND ($3::TEXT IS NULL OR a.connection_status = $3)
            ORDER BY {}
            LIMIT $4 OFFSET $5
            "#,
            sort.order_by("a")
        );

        let rows = sqlx::query(&sql)
            .bind(search)
            .bind(req.account_type_id)
            .bind(req.connection_status.map(|s| s.as_str()))
            .bind(sort.limit)
            .bind(sort.offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(db_error("find all bank accounts"))?;

        let (accounts, total) = with_total::<BankAccountModel>(rows)?;

        info!("✅ Retrieved {} bank accounts", accounts.len());

        Ok((accounts, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<BankAccountModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = format!("{ACCOUNT_SELECT} WHERE a.id = $1 AND a.deleted_at IS NULL");

        sqlx::query_as::<_, BankAccountModel>(&sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error("find bank account by id"))
    }

    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<BankAccountModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = format!("{ACCOUNT_SELECT} WHERE a.external_id = $1 AND a.deleted_at IS NULL");

        sqlx::query_as::<_, BankAccountModel>(&sql)
            .bind(external_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error("find bank account by external id"))
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<BankAccountModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql =
            format!("{ACCOUNT_SELECT} WHERE a.account_number = $1 AND a.deleted_at IS NULL");

        sqlx::query_as::<_, BankAccountModel>(&sql)
            .bind(account_number)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("find bank account by number"))
    }

    async fn find_main_withdraw(&self) -> Result<Option<BankAccountModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = format!("{ACCOUNT_SELECT} WHERE a.is_main_withdraw AND a.deleted_at IS NULL");

        sqlx::query_as::<_, BankAccountModel>(&sql)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("find main withdraw account"))
    }

    async fn find_automated(&self) -> Result<Vec<BankAccountModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = format!(
            r#"{ACCOUNT_SELECT}
            WHERE a.deleted_at IS NULL
              AND COALESCE(a.device_uid, '') <> ''
              AND COALESCE(a.pin_code, '') <> ''
            ORDER BY a.id"#
        );

        sqlx::query_as::<_, BankAccountModel>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(db_error("find automated bank accounts"))
    }
}
