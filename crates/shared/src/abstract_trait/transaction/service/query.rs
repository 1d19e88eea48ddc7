use crate::{
    domain::{
        requests::FindAllTransactions,
        responses::{
            ApiResponse, ApiResponsePagination, BankTransactionResponse, MemberSummaryResponse,
            StatusCountResponse, TransactionDetailResponse,
        },
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransactionQueryService = Arc<dyn TransactionQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransactionQueryServiceTrait {
    async fn find_pending(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponsePagination<Vec<BankTransactionResponse>>, ServiceError>;

    async fn find_finished(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponsePagination<Vec<BankTransactionResponse>>, ServiceError>;

    async fn status_count(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponse<StatusCountResponse>, ServiceError>;

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<ApiResponse<TransactionDetailResponse>, ServiceError>;

    async fn member_summary(
        &self,
        user_id: i64,
    ) -> Result<ApiResponse<MemberSummaryResponse>, ServiceError>;
}
