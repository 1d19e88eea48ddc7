use crate::{
    domain::requests::FindAllBankAccounts, errors::RepositoryError, model::BankAccountModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankAccountQueryRepository = Arc<dyn BankAccountQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BankAccountQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllBankAccounts,
    ) -> Result<(Vec<BankAccountModel>, i64), RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<BankAccountModel, RepositoryError>;

    async fn find_by_external_id(&self, external_id: i64)
    -> Result<BankAccountModel, RepositoryError>;

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<BankAccountModel>, RepositoryError>;

    async fn find_main_withdraw(&self) -> Result<Option<BankAccountModel>, RepositoryError>;

    /// Live accounts carrying a device uid and pin.
    async fn find_automated(&self) -> Result<Vec<BankAccountModel>, RepositoryError>;
}
