use crate::{
    domain::requests::{NewBankStatement, StatementTransition},
    errors::RepositoryError,
    model::BankStatementModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankStatementCommandRepository =
    Arc<dyn BankStatementCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BankStatementCommandRepositoryTrait {
    /// Fails with `AlreadyExists` when a live statement has the same external id.
    async fn create(&self, req: &NewBankStatement) -> Result<BankStatementModel, RepositoryError>;

    /// Journals the action and moves the statement out of `pending` atomically;
    /// `Conflict` when the statement is no longer pending.
    async fn transition(
        &self,
        req: &StatementTransition,
    ) -> Result<BankStatementModel, RepositoryError>;
}
