use crate::{
    abstract_trait::{
        member::repository::DynUserRepository,
        transaction::{
            repository::query::DynBankTransactionQueryRepository,
            service::query::TransactionQueryServiceTrait,
        },
    },
    domain::{
        requests::FindAllTransactions,
        responses::{
            ApiResponse, ApiResponsePagination, BankTransactionResponse, MemberSummaryResponse,
            StatusCountResponse, TransactionDetailResponse,
        },
    },
    errors::ServiceError,
    model::{TransactionStatus, TransactionStatusCountModel},
    service::validate_request,
};
use async_trait::async_trait;
use tracing::info;

const PENDING: &[TransactionStatus] = &[
    TransactionStatus::Pending,
    TransactionStatus::PendingCredit,
    TransactionStatus::PendingTransfer,
];

const FINISHED: &[TransactionStatus] = &[TransactionStatus::Finished, TransactionStatus::Canceled];

pub struct TransactionQueryService {
    query: DynBankTransactionQueryRepository,
    users: DynUserRepository,
}

impl TransactionQueryService {
    pub async fn new(query: DynBankTransactionQueryRepository, users: DynUserRepository) -> Self {
        Self { query, users }
    }

    async fn list(
        &self,
        req: &FindAllTransactions,
        statuses: &[TransactionStatus],
        message: &str,
    ) -> Result<ApiResponsePagination<Vec<BankTransactionResponse>>, ServiceError> {
        validate_request(req)?;

        let (rows, total) = self.query.find_all(req, statuses).await?;

        info!("🔍 Found {} {message} (total {total})", rows.len());

        Ok(ApiResponsePagination {
            message: message.into(),
            list: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }
}

/// Folds grouped counts into the UI buckets; canceled rows count as failed.
pub(crate) fn fold_status_counts(rows: &[TransactionStatusCountModel]) -> StatusCountResponse {
    let mut counts = StatusCountResponse {
        pending: 0,
        pending_credit: 0,
        pending_transfer: 0,
        finished: 0,
        failed: 0,
    };

    for row in rows {
        let Ok(status) = row.status.parse::<TransactionStatus>() else {
            continue;
        };

        let bucket = match status {
            TransactionStatus::Pending => &mut counts.pending,
            TransactionStatus::PendingCredit => &mut counts.pending_credit,
            TransactionStatus::PendingTransfer => &mut counts.pending_transfer,
            TransactionStatus::Finished => &mut counts.finished,
            TransactionStatus::Canceled => &mut counts.failed,
        };
        *bucket += row.total;
    }

    counts
}

#[async_trait]
impl TransactionQueryServiceTrait for TransactionQueryService {
    async fn find_pending(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponsePagination<Vec<BankTransactionResponse>>, ServiceError> {
        self.list(req, PENDING, "pending transactions").await
    }

    async fn find_finished(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponsePagination<Vec<BankTransactionResponse>>, ServiceError> {
        self.list(req, FINISHED, "finished transactions").await
    }

    async fn status_count(
        &self,
        req: &FindAllTransactions,
    ) -> Result<ApiResponse<StatusCountResponse>, ServiceError> {
        validate_request(req)?;

        let rows = self.query.count_by_status(req).await?;

        Ok(ApiResponse::ok("status count", fold_status_counts(&rows)))
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<ApiResponse<TransactionDetailResponse>, ServiceError> {
        let transaction = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::missing("transaction"))?;

        let actions = self.query.find_actions(id).await?;

        Ok(ApiResponse::ok(
            "transaction",
            TransactionDetailResponse {
                transaction: transaction.into(),
                actions: actions.into_iter().map(Into::into).collect(),
            },
        ))
    }

    async fn member_summary(
        &self,
        user_id: i64,
    ) -> Result<ApiResponse<MemberSummaryResponse>, ServiceError> {
        let member = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(ServiceError::missing("member"))?;

        let summary = self.query.member_summary(user_id).await?;

        Ok(ApiResponse::ok(
            "member summary",
            MemberSummaryResponse::new(member.credit, summary),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, total: i64) -> TransactionStatusCountModel {
        TransactionStatusCountModel {
            status: status.into(),
            total,
        }
    }

    #[test]
    fn canceled_counts_as_failed() {
        let counts = fold_status_counts(&[
            row("pending", 2),
            row("pending_transfer", 1),
            row("finished", 7),
            row("canceled", 3),
        ]);

        assert_eq!(counts.pending, 2);
        assert_eq!(counts.pending_credit, 0);
        assert_eq!(counts.pending_transfer, 1);
        assert_eq!(counts.finished, 7);
        assert_eq!(counts.failed, 3);
    }

    #[test]
    fn unknown_status_is_ignored() {
        let counts = fold_status_counts(&[row("archived", 5)]);
        assert_eq!(counts.failed + counts.finished + counts.pending, 0);
    }
}
