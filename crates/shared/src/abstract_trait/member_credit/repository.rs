use crate::{
    domain::requests::{CreditChange, FindMemberStatements},
    errors::RepositoryError,
    model::MemberStatementModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynMemberCreditRepository = Arc<dyn MemberCreditRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait MemberCreditRepositoryTrait {
    async fn increase(&self, change: &CreditChange)
    -> Result<MemberStatementModel, RepositoryError>;

    /// Fails with `InsufficientCredit` when the amount exceeds the member's credit.
    async fn decrease(&self, change: &CreditChange)
    -> Result<MemberStatementModel, RepositoryError>;

    async fn find_by_user(
        &self,
        user_id: i64,
        req: &FindMemberStatements,
    ) -> Result<(Vec<MemberStatementModel>, i64), RepositoryError>;
}
