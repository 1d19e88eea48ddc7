use crate::{
    domain::{
        requests::{Actor, ExternalStatement, MatchStatementOwnerRequest},
        responses::{ApiResponse, BankStatementResponse, WebhookResultResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynStatementCommandService = Arc<dyn StatementCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait StatementCommandServiceTrait {
    async fn process_webhook_action(
        &self,
        payload: &serde_json::Value,
    ) -> Result<ApiResponse<WebhookResultResponse>, ServiceError>;

    async fn process_webhook_noti(
        &self,
        payload: &serde_json::Value,
    ) -> Result<ApiResponse<i64>, ServiceError>;

    async fn process_statement(
        &self,
        statement: &ExternalStatement,
    ) -> Result<ApiResponse<BankStatementResponse>, ServiceError>;

    async fn add_account_statement_to_webhook(
        &self,
        account_id: i64,
        external_id: i64,
    ) -> Result<ApiResponse<BankStatementResponse>, ServiceError>;

    async fn match_statement_owner(
        &self,
        statement_id: i64,
        req: &MatchStatementOwnerRequest,
        actor: &Actor,
    ) -> Result<ApiResponse<BankStatementResponse>, ServiceError>;

    async fn ignore_statement_owner(
        &self,
        statement_id: i64,
        actor: &Actor,
    ) -> Result<ApiResponse<BankStatementResponse>, ServiceError>;
}
