use crate::{
    domain::{
        requests::{
            GatewayAccountRequest, GatewayStatementQuery, GatewayTransferRequest,
            GatewayVerifyTransferRequest,
        },
        responses::{
            GatewayAccountCreated, GatewayBalance, GatewayBotAccount, GatewayBotStatus,
            GatewayStatementPage, GatewayTransferResult, GatewayVerifyResult,
        },
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankGatewayClient = Arc<dyn BankGatewayClientTrait + Send + Sync>;

/// External bank-automation provider. Every failure surfaces as `ServiceError::ExternalApi`.
#[async_trait]
pub trait BankGatewayClientTrait {
    async fn list_bot_accounts(&self) -> Result<Vec<GatewayBotAccount>, ServiceError>;

    async fn get_balance(&self, account_number: &str) -> Result<GatewayBalance, ServiceError>;

    async fn get_status(&self, account_number: &str) -> Result<GatewayBotStatus, ServiceError>;

    async fn list_statements(
        &self,
        query: &GatewayStatementQuery,
    ) -> Result<GatewayStatementPage, ServiceError>;

    async fn create_bot_account(
        &self,
        req: &GatewayAccountRequest,
    ) -> Result<GatewayAccountCreated, ServiceError>;

    async fn update_bot_account(
        &self,
        external_id: i64,
        req: &GatewayAccountRequest,
    ) -> Result<GatewayAccountCreated, ServiceError>;

    async fn delete_bot_account(&self, account_number: &str) -> Result<(), ServiceError>;

    async fn enable_bot_account(
        &self,
        account_number: &str,
        enable: bool,
    ) -> Result<(), ServiceError>;

    async fn verify_transfer(
        &self,
        req: &GatewayVerifyTransferRequest,
    ) -> Result<GatewayVerifyResult, ServiceError>;

    async fn transfer(
        &self,
        req: &GatewayTransferRequest,
    ) -> Result<GatewayTransferResult, ServiceError>;
}
