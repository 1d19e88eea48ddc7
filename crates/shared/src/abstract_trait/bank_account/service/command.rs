use crate::{
    domain::{
        requests::{CreateBankAccountRequest, UpdateBankAccountRequest},
        responses::{ApiResponse, BankAccountResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankAccountCommandService = Arc<dyn BankAccountCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait BankAccountCommandServiceTrait {
    async fn create(
        &self,
        req: &CreateBankAccountRequest,
    ) -> Result<ApiResponse<BankAccountResponse>, ServiceError>;

    async fn update(
        &self,
        req: &UpdateBankAccountRequest,
    ) -> Result<ApiResponse<BankAccountResponse>, ServiceError>;

    async fn delete(&self, id: i64) -> Result<ApiResponse<BankAccountResponse>, ServiceError>;

    /// Refreshes connection status and balance of every automated account; returns how many were polled.
    async fn update_all_bot_status(&self) -> Result<usize, ServiceError>;
}
