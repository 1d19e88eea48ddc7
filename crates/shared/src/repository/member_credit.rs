use crate::{
    abstract_trait::member_credit::repository::MemberCreditRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreditChange, CreditMove, FindMemberStatements},
    errors::RepositoryError,
    model::MemberStatementModel,
    repository::{db_error, ledger::apply_credit_move, with_total},
    utils::local_now,
};
use async_trait::async_trait;
use tracing::info;

pub struct MemberCreditRepository {
    db: ConnectionPool,
}

impl MemberCreditRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn change(&self, mv: CreditMove) -> Result<MemberStatementModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(db_error("begin credit change"))?;

        let row = apply_credit_move(&mut tx, &mv).await?;

        tx.commit().await.map_err(db_error("commit credit change"))?;

        info!(
            "member {} credit {} -> {} ({})",
            row.user_id, row.before_balance, row.after_balance, row.statement_type
        );

        Ok(row)
    }
}

fn to_move(change: &CreditChange, credit: bool) -> Result<CreditMove, RepositoryError> {
    if change.statement_type.is_credit() != credit {
        return Err(RepositoryError::Custom(format!(
            "statement type {} cannot be used to {} credit",
            change.statement_type,
            if credit { "increase" } else { "decrease" }
        )));
    }

    Ok(CreditMove {
        user_id: change.user_id,
        amount: change.amount,
        statement_type: change.statement_type,
        info: change.info.clone(),
        transfer_at: change.transfer_at.unwrap_or_else(local_now),
    })
}

#[async_trait]
impl MemberCreditRepositoryTrait for MemberCreditRepository {
    async fn increase(
        &self,
        change: &CreditChange,
    ) -> Result<MemberStatementModel, RepositoryError> {
        self.change(to_move(change, true)?).await
    }

    async fn decrease(
        &self,
        change: &CreditChange,
    ) -> Result<MemberStatementModel, RepositoryError> {
        self.change(to_move(change, false)?).await
    }

    async fn find_by_user(
        &self,
        user_id: i64,
        req: &FindMemberStatements,
    ) -> Result<(Vec<MemberStatementModel>, i64), RepositoryError> {
        let dir = if req.sort_asc.unwrap_or(true) { "ASC" } else { "DESC" };
        let limit = (req.limit > 0).then_some(req.limit);
        let offset = limit.map(|l| (req.page.max(1) - 1) * l).unwrap_or(0);

        let sql = format!(
            r#"
            SELECT m.*, COUNT(*) OVER() AS total_count
            FROM member_statements m
            WHERE m.user_id = $1
              AND ($2::TEXT IS NULL OR m.statement_type = $2)
              AND ($3::TIMESTAMP IS NULL OR m.transfer_at >= $3)
              AND ($4::TIMESTAMP IS NULL OR m.transfer_at <= $4)
            ORDER BY m.id {dir}
            LIMIT $5 OFFSET $6
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(req.statement_type.map(|t| t.as_str()))
            .bind(req.from_date)
            .bind(req.to_date)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await
            .map_err(db_error("find member statements"))?;

        with_total(rows)
    }
}
