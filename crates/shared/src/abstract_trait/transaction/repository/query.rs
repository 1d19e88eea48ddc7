use crate::{
    domain::requests::FindAllTransactions,
    errors::RepositoryError,
    model::{
        BankTransactionModel, MemberTransactionSummaryModel, TransactionActionModel,
        TransactionStatus, TransactionStatusCountModel,
    },
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBankTransactionQueryRepository =
    Arc<dyn BankTransactionQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BankTransactionQueryRepositoryTrait {
    /// Active rows only (not removed, not deleted) whose status is in `statuses`.
    async fn find_all(
        &self,
        req: &FindAllTransactions,
        statuses: &[TransactionStatus],
    ) -> Result<(Vec<BankTransactionModel>, i64), RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<BankTransactionModel, RepositoryError>;

    async fn count_by_status(
        &self,
        req: &FindAllTransactions,
    ) -> Result<Vec<TransactionStatusCountModel>, RepositoryError>;

    /// Sums over finished transactions of one member.
    async fn member_summary(
        &self,
        user_id: i64,
    ) -> Result<MemberTransactionSummaryModel, RepositoryError>;

    /// Full journal including rolled back rows, oldest first.
    async fn find_actions(
        &self,
        transaction_id: i64,
    ) -> Result<Vec<TransactionActionModel>, RepositoryError>;

    async fn find_live_action(
        &self,
        action_key: &str,
    ) -> Result<Option<TransactionActionModel>, RepositoryError>;
}
