use crate::{
    domain::{
        requests::{
            Actor, CancelTransactionRequest, ConfirmDepositRequest, ConfirmWithdrawRequest,
            CreateBankTransactionRequest,
        },
        responses::{ApiResponse, BankTransactionResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransactionCommandService = Arc<dyn TransactionCommandServiceTrait + Send + Sync>;

type TransactionResult = Result<ApiResponse<BankTransactionResponse>, ServiceError>;

#[async_trait]
pub trait TransactionCommandServiceTrait {
    async fn create(&self, req: &CreateBankTransactionRequest, actor: &Actor) -> TransactionResult;

    /// deposit: pending -> pending_credit, then the credit step when auto credit is on.
    async fn confirm_deposit(
        &self,
        id: i64,
        req: &ConfirmDepositRequest,
        actor: &Actor,
    ) -> TransactionResult;

    /// deposit/bonus: pending_credit -> finished, crediting the member.
    async fn confirm_deposit_credit(
        &self,
        id: i64,
        req: &ConfirmDepositRequest,
        actor: &Actor,
    ) -> TransactionResult;

    /// withdraw: pending_credit -> pending_transfer; getcreditback: pending_credit -> finished.
    async fn confirm_withdraw_credit(
        &self,
        id: i64,
        req: &ConfirmWithdrawRequest,
        actor: &Actor,
    ) -> TransactionResult;

    /// withdraw: pending_transfer -> finished, paying out through the gateway when allowed.
    async fn confirm_withdraw_transfer(
        &self,
        id: i64,
        req: &ConfirmWithdrawRequest,
        actor: &Actor,
    ) -> TransactionResult;

    async fn continue_auto_withdraw(&self, id: i64, actor: &Actor) -> TransactionResult;

    async fn cancel(
        &self,
        id: i64,
        req: &CancelTransactionRequest,
        actor: &Actor,
    ) -> TransactionResult;

    async fn remove(&self, id: i64, actor: &Actor) -> TransactionResult;
}
