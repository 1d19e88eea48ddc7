use crate::{
    domain::requests::FindAllStatements,
    errors::RepositoryError,
    model::{BankStatementModel, StatementActionModel, StatementSummaryModel},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankStatementQueryRepository =
    Arc<dyn BankStatementQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BankStatementQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllStatements,
    ) -> Result<(Vec<BankStatementModel>, i64), RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<BankStatementModel, RepositoryError>;

    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<BankStatementModel>, RepositoryError>;

    async fn find_by_external_ids(
        &self,
        external_ids: &[i64],
    ) -> Result<Vec<BankStatementModel>, RepositoryError>;

    async fn summary(&self, req: &FindAllStatements)
    -> Result<StatementSummaryModel, RepositoryError>;

    async fn find_actions(
        &self,
        statement_id: i64,
    ) -> Result<Vec<StatementActionModel>, RepositoryError>;
}
