use crate::{
    domain::requests::{Actor, NewBankTransaction, NewTransactionAction, TransactionStep},
    errors::RepositoryError,
    model::{BankTransactionModel, TransactionActionModel},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankTransactionCommandRepository =
    Arc<dyn BankTransactionCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BankTransactionCommandRepositoryTrait {
    async fn create(&self, req: &NewBankTransaction)
    -> Result<BankTransactionModel, RepositoryError>;

    /// `AlreadyExists` when a live action already holds the key.
    async fn create_action(
        &self,
        req: &NewTransactionAction,
    ) -> Result<TransactionActionModel, RepositoryError>;

    /// Renames the key to `ROLLBACK#<id>` and marks the row deleted.
    async fn rollback_action(&self, action_id: i64) -> Result<(), RepositoryError>;

    /// Records that the gateway payout of the action went through.
    async fn mark_action_paid(&self, action_id: i64) -> Result<(), RepositoryError>;

    /// Credit moves and the status update commit together or not at all.
    /// `Conflict` when the transaction is not in `expected_status`.
    async fn apply_step(&self, step: &TransactionStep)
    -> Result<BankTransactionModel, RepositoryError>;

    async fn remove(&self, id: i64, actor: &Actor) -> Result<BankTransactionModel, RepositoryError>;
}
