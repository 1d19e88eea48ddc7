use crate::{
    domain::{
        requests::FindAllBankAccounts,
        responses::{ApiResponse, ApiResponsePagination, BankAccountResponse, BankResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankAccountQueryService = Arc<dyn BankAccountQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait BankAccountQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllBankAccounts,
    ) -> Result<ApiResponsePagination<Vec<BankAccountResponse>>, ServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<BankAccountResponse>, ServiceError>;

    async fn find_banks(&self) -> Result<ApiResponse<Vec<BankResponse>>, ServiceError>;
}
