use crate::{
    domain::requests::{NewBankAccount, UpdateBotStatus},
    errors::RepositoryError,
    model::BankAccountModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankAccountCommandRepository =
    Arc<dyn BankAccountCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BankAccountCommandRepositoryTrait {
    /// When `is_main_withdraw` is set, every other live account is reset in the same transaction.
    async fn create(&self, req: &NewBankAccount) -> Result<BankAccountModel, RepositoryError>;

    async fn update(
        &self,
        id: i64,
        req: &NewBankAccount,
    ) -> Result<BankAccountModel, RepositoryError>;

    async fn set_external(
        &self,
        id: i64,
        external_id: Option<i64>,
        pin_code: Option<String>,
    ) -> Result<BankAccountModel, RepositoryError>;

    async fn update_bot_status(&self, req: &UpdateBotStatus) -> Result<(), RepositoryError>;

    /// Soft delete; the account number is rewritten to `<number>_del<id>`.
    async fn delete(&self, id: i64) -> Result<BankAccountModel, RepositoryError>;
}
