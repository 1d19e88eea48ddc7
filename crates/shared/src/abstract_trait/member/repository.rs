use crate::{errors::RepositoryError, model::UserModel};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_by_id(&self, id: i64) -> Result<UserModel, RepositoryError>;

    async fn find_by_member_code(&self, member_code: &str) -> Result<UserModel, RepositoryError>;

    /// Members whose bank matches `bank_code` and whose account number contains `account_fragment`.
    async fn find_possible_owners(
        &self,
        bank_code: &str,
        account_fragment: &str,
    ) -> Result<Vec<UserModel>, RepositoryError>;

    async fn set_member_code(&self, id: i64, member_code: &str)
    -> Result<UserModel, RepositoryError>;
}
