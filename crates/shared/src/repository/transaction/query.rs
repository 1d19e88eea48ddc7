use crate::{
    abstract_trait::transaction::repository::query::BankTransactionQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllTransactions, SortSpec},
    errors::RepositoryError,
    model::{
        BankTransactionModel, MemberTransactionSummaryModel, TransactionActionModel,
        TransactionStatus, TransactionStatusCountModel,
    },
    repository::{db_error, with_total},
};
use async_trait::async_trait;
use tracing::info;

// $1 status list, $2..$8 optional filters.
const TRANSACTION_FILTER: &str = r#"
    t.deleted_at IS NULL AND t.removed_at IS NULL
      AND t.status = ANY($1)
      AND ($2::TEXT IS NULL OR t.member_code ILIKE '%' || $2 || '%'
           OR t.from_account_number ILIKE '%' || $2 || '%'
           OR t.to_account_number ILIKE '%' || $2 || '%')
      AND ($3::TIMESTAMP IS NULL OR t.created_at >= $3)
      AND ($4::TIMESTAMP IS NULL OR t.created_at <= $4)
      AND ($5::TEXT IS NULL OR t.transfer_type = $5)
      AND ($6::BIGINT IS NULL OR t.user_id = $6)
      AND ($7::BIGINT IS NULL OR t.from_account_id = $7 OR t.to_account_id = $7)
"#;

pub struct BankTransactionQueryRepository {
    db: ConnectionPool,
}

impl BankTransactionQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// Status list after narrowing by the request's own status filter.
fn status_list(req: &FindAllTransactions, statuses: &[TransactionStatus]) -> Vec<String> {
    statuses
        .iter()
        .filter(|s| req.status.is_none_or(|wanted| wanted == **s))
        .map(|s| s.as_str().to_string())
        .collect()
}

fn search_term(req: &FindAllTransactions) -> Option<&str> {
    req.search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl BankTransactionQueryRepositoryTrait for BankTransactionQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllTransactions,
        statuses: &[TransactionStatus],
    ) -> Result<(Vec<BankTransactionModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching transactions in {:?} with search: {:?}",
            statuses, req.search
        );

        let sort = SortSpec::resolve(
            req.sort_col.as_deref(),
            req.sort_asc,
            req.page,
            req.limit,
            FindAllTransactions::SORT_COLUMNS,
        );

        let sql = format!(
            r#"
            SELECT t.*, COUNT(*) OVER() AS total_count
            FROM bank_transactions t
            WHERE {TRANSACTION_FILTER}
            ORDER BY {}
            LIMIT $8 OFFSET $9
            "#,
            sort.order_by("t")
        );

        let rows = sqlx::query(&sql)
            .bind(status_list(req, statuses))
            .bind(search_term(req))
            .bind(req.from_date)
            .bind(req.to_date)
            .bind(req.transfer_type.map(|t| t.as_str()))
            .bind(req.user_id)
            .bind(req.account_id)
            .bind(sort.limit)
            .bind(sort.offset)
            .fetch_all(&self.db)
            .await
            .map_err(db_error("find all transactions"))?;

        let (transactions, total) = with_total::<BankTransactionModel>(rows)?;

        info!("✅ Retrieved {} transactions", transactions.len());

        Ok((transactions, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<BankTransactionModel, RepositoryError> {
        sqlx::query_as::<_, BankTransactionModel>(
            "SELECT * FROM bank_transactions WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(db_error("find transaction by id"))
    }

    async fn count_by_status(
        &self,
        req: &FindAllTransactions,
    ) -> Result<Vec<TransactionStatusCountModel>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT t.status, COUNT(*) AS total
            FROM bank_transactions t
            WHERE {TRANSACTION_FILTER}
            GROUP BY t.status
            "#
        );

        sqlx::query_as::<_, TransactionStatusCountModel>(&sql)
            .bind(status_list(req, TransactionStatus::ALL))
            .bind(search_term(req))
            .bind(req.from_date)
            .bind(req.to_date)
            .bind(req.transfer_type.map(|t| t.as_str()))
            .bind(req.user_id)
            .bind(req.account_id)
            .fetch_all(&self.db)
            .await
            .map_err(db_error("count transactions by status"))
    }

    async fn member_summary(
        &self,
        user_id: i64,
    ) -> Result<MemberTransactionSummaryModel, RepositoryError> {
        sqlx::query_as::<_, MemberTransactionSummaryModel>(
            r#"
            SELECT
                $1::BIGINT AS user_id,
                COUNT(*) FILTER (WHERE transfer_type = 'deposit') AS deposit_count,
                COALESCE(SUM(credit_amount) FILTER (WHERE transfer_type = 'deposit'), 0)::DOUBLE PRECISION
                    AS deposit_amount,
                COUNT(*) FILTER (WHERE transfer_type = 'withdraw') AS withdraw_count,
                COALESCE(SUM(credit_amount) FILTER (WHERE transfer_type = 'withdraw'), 0)::DOUBLE PRECISION
                    AS withdraw_amount,
                COUNT(*) FILTER (WHERE transfer_type = 'bonus') AS bonus_count,
                COALESCE(SUM(bonus_amount) FILTER (WHERE transfer_type = 'bonus'), 0)::DOUBLE PRECISION
                    AS bonus_amount,
                COUNT(*) FILTER (WHERE transfer_type = 'getcreditback') AS getcreditback_count,
                COALESCE(SUM(credit_amount) FILTER (WHERE transfer_type = 'getcreditback'), 0)::DOUBLE PRECISION
                    AS getcreditback_amount
            FROM bank_transactions
            WHERE user_id = $1
              AND status = 'finished'
              AND deleted_at IS NULL AND removed_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(db_error("summarize member transactions"))
    }

    async fn find_actions(
        &self,
        transaction_id: i64,
    ) -> Result<Vec<TransactionActionModel>, RepositoryError> {
        sqlx::query_as::<_, TransactionActionModel>(
            "SELECT * FROM bank_transaction_actions WHERE transaction_id = $1 ORDER BY id",
        )
        .bind(transaction_id)
        .fetch_all(&self.db)
        .await
        .map_err(db_error("find transaction actions"))
    }

    async fn find_live_action(
        &self,
        action_key: &str,
    ) -> Result<Option<TransactionActionModel>, RepositoryError> {
        sqlx::query_as::<_, TransactionActionModel>(
            "SELECT * FROM bank_transaction_actions WHERE action_key = $1 AND deleted_at IS NULL",
        )
        .bind(action_key)
        .fetch_optional(&self.db)
        .await
        .map_err(db_error("find live transaction action"))
    }
}
