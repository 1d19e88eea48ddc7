use crate::{
    domain::{
        requests::{FindAllStatements, GetAccountStatements},
        responses::{
            AccountStatementResponse, ApiResponse, ApiResponsePagination, BankStatementResponse,
            MemberResponse, StatementSummaryResponse,
        },
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynStatementQueryService = Arc<dyn StatementQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait StatementQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllStatements,
    ) -> Result<ApiResponsePagination<Vec<BankStatementResponse>>, ServiceError>;

    async fn find_by_id(&self, id: i64)
    -> Result<ApiResponse<BankStatementResponse>, ServiceError>;

    async fn summary(
        &self,
        req: &FindAllStatements,
    ) -> Result<ApiResponse<StatementSummaryResponse>, ServiceError>;

    async fn find_possible_owners(
        &self,
        statement_id: i64,
    ) -> Result<ApiResponse<Vec<MemberResponse>>, ServiceError>;

    /// Pulls statements from the gateway and tags each with its stored status or `new`.
    async fn get_account_statements(
        &self,
        account_id: i64,
        req: &GetAccountStatements,
    ) -> Result<ApiResponsePagination<Vec<AccountStatementResponse>>, ServiceError>;
}
