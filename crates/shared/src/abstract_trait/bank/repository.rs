use crate::{errors::RepositoryError, model::BankModel};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankRepository = Arc<dyn BankRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BankRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<BankModel>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<BankModel, RepositoryError>;
    async fn find_by_code(&self, code: &str) -> Result<BankModel, RepositoryError>;
}
