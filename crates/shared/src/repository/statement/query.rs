use crate::{
    abstract_trait::statement::repository::query::BankStatementQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllStatements, SortSpec},
    errors::RepositoryError,
    model::{BankStatementModel, StatementActionModel, StatementSummaryModel},
    repository::{db_error, with_total},
};
use async_trait::async_trait;
use tracing::info;

const STATEMENT_FILTER: &str = r#"
    s.deleted_at IS NULL
      AND ($1::TEXT IS NULL OR s.detail ILIKE '%' || $1 || '%'
           OR s.from_account_number ILIKE '%' || $1 || '%')
      AND ($2::TIMESTAMP IS NULL OR s.transfer_at >= $2)
      AND ($3::TIMESTAMP IS NULL OR s.transfer_at <= $3)
      AND ($4::BIGINT IS NULL OR s.account_id = $4)
      AND ($5::TEXT IS NULL OR s.statement_type = $5)
      AND ($6::TEXT IS NULL OR s.status = $6)
"#;

pub struct BankStatementQueryRepository {
    db: ConnectionPool,
}

impl BankStatementQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn search_term(req: &FindAllStatements) -> Option<&str> {
    req.search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl BankStatementQueryRepositoryTrait for BankStatementQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllStatements,
    ) -> Result<(Vec<BankStatementModel>, i64), RepositoryError> {
        info!("🔍 Fetching bank statements with search: {:?}", req.search);

        let sort = SortSpec::resolve(
            req.sort_col.as_deref(),
            req.sort_asc,
            req.page,
            req.limit,
            FindAllStatements::SORT_COLUMNS,
        );

        let sql = format!(
            r#"
            SELECT s.*, COUNT(*) OVER() AS total_count
            FROM bank_statements s
            WHERE {STATEMENT_FILTER}
            ORDER BY {}
            LIMIT $7 OFFSET $8
            "#,
            sort.order_by("s")
        );

        let rows = sqlx::query(&sql)
            .bind(search_term(req))
            .bind(req.from_date)
            .bind(req.to_date)
            .bind(req.account_id)
            .bind(req.statement_type.map(|t| t.as_str()))
            .bind(req.status.map(|s| s.as_str()))
            .bind(sort.limit)
            .bind(sort.offset)
            .fetch_all(&self.db)
            .await
            .map_err(db_error("find all statements"))?;

        let (statements, total) = with_total::<BankStatementModel>(rows)?;

        info!("✅ Retrieved {} bank statements", statements.len());

        Ok((statements, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<BankStatementModel, RepositoryError> {
        sqlx::query_as::<_, BankStatementModel>(
            "SELECT * FROM bank_statements WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(db_error("find statement by id"))
    }

    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<BankStatementModel>, RepositoryError> {
        sqlx::query_as::<_, BankStatementModel>(
            "SELECT * FROM bank_statements WHERE external_id = $1 AND deleted_at IS NULL",
        )
        .bind(external_id)
        .fetch_optional(&self.db)
        .await
        .map_err(db_error("find statement by external id"))
    }

    async fn find_by_external_ids(
        &self,
        external_ids: &[i64],
    ) -> Result<Vec<BankStatementModel>, RepositoryError> {
        if external_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, BankStatementModel>(
            "SELECT * FROM bank_statements WHERE external_id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(external_ids)
        .fetch_all(&self.db)
        .await
        .map_err(db_error("find statements by external ids"))
    }

    async fn summary(
        &self,
        req: &FindAllStatements,
    ) -> Result<StatementSummaryModel, RepositoryError> {
        let sql = format!(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE s.status = 'pending') AS total_pending,
                COUNT(*) FILTER (WHERE s.status = 'confirmed') AS total_confirmed,
                COUNT(*) FILTER (WHERE s.status = 'ignored') AS total_ignored,
                COALESCE(SUM(s.amount) FILTER (WHERE s.statement_type = 'transfer_in'), 0)::DOUBLE PRECISION
                    AS sum_transfer_in,
                COALESCE(SUM(s.amount) FILTER (WHERE s.statement_type = 'transfer_out'), 0)::DOUBLE PRECISION
                    AS sum_transfer_out
            FROM bank_statements s
            WHERE {STATEMENT_FILTER}
            "#
        );

        sqlx::query_as::<_, StatementSummaryModel>(&sql)
            .bind(search_term(req))
            .bind(req.from_date)
            .bind(req.to_date)
            .bind(req.account_id)
            .bind(req.statement_type.map(|t| t.as_str()))
            .bind(req.status.map(|s| s.as_str()))
            .fetch_one(&self.db)
            .await
            .map_err(db_error("summarize statements"))
    }

    async fn find_actions(
        &self,
        statement_id: i64,
    ) -> Result<Vec<StatementActionModel>, RepositoryError> {
        sqlx::query_as::<_, StatementActionModel>(
            "SELECT * FROM bank_statement_actions WHERE statement_id = $1 ORDER BY id",
        )
        .bind(statement_id)
        .fetch_all(&self.db)
        .await
        .map_err(db_error("find statement actions"))
    }
}
