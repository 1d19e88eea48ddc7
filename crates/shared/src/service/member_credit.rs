use crate::{
    abstract_trait::{
        member::repository::DynUserRepository,
        member_credit::{
            repository::DynMemberCreditRepository, service::MemberCreditServiceTrait,
        },
    },
    domain::{
        requests::{CreditChange, FindMemberStatements},
        responses::{ApiResponse, ApiResponsePagination, MemberStatementResponse},
    },
    errors::ServiceError,
    model::MemberStatementModel,
    service::validate_request,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct MemberCreditService {
    ledger: DynMemberCreditRepository,
    users: DynUserRepository,
}

impl MemberCreditService {
    pub async fn new(ledger: DynMemberCreditRepository, users: DynUserRepository) -> Self {
        Self { ledger, users }
    }

    fn check(change: &CreditChange, credit: bool) -> Result<(), ServiceError> {
        validate_request(change)?;

        if change.statement_type.is_credit() != credit {
            return Err(ServiceError::invalid(format!(
                "statement_type: {} does not {} credit",
                change.statement_type,
                if credit { "add" } else { "remove" }
            )));
        }

        Ok(())
    }

    /// Runs after every committed ledger mutation.
    fn sync_agent(row: &MemberStatementModel) {
        info!(
            "credit sync: member {} balance {} after {} {}",
            row.user_id, row.after_balance, row.statement_type, row.amount
        );
    }
}

#[async_trait]
impl MemberCreditServiceTrait for MemberCreditService {
    async fn increase(
        &self,
        change: &CreditChange,
    ) -> Result<ApiResponse<MemberStatementResponse>, ServiceError> {
        Self::check(change, true)?;

        let row = self.ledger.increase(change).await.map_err(|e| {
            error!("❌ Failed to increase credit of member {}: {e}", change.user_id);
            ServiceError::from(e)
        })?;

        Self::sync_agent(&row);

        Ok(ApiResponse::ok("credit increased", row.into()))
    }

    async fn decrease(
        &self,
        change: &CreditChange,
    ) -> Result<ApiResponse<MemberStatementResponse>, ServiceError> {
        if change.amount.is_nan() || change.amount <= 0.0 {
            let member = self
                .users
                .find_by_id(change.user_id)
                .await
                .map_err(ServiceError::missing("member"))?;

            return Err(ServiceError::InsufficientCredit {
                available: member.credit,
                requested: change.amount,
            });
        }

        Self::check(change, false)?;

        let row = self.ledger.decrease(change).await.map_err(|e| {
            error!("❌ Failed to decrease credit of member {}: {e}", change.user_id);
            ServiceError::from(e)
        })?;

        Self::sync_agent(&row);

        Ok(ApiResponse::ok("credit decreased", row.into()))
    }

    async fn find_member_statements(
        &self,
        user_id: i64,
        req: &FindMemberStatements,
    ) -> Result<ApiResponsePagination<Vec<MemberStatementResponse>>, ServiceError> {
        validate_request(req)?;

        self.users
            .find_by_id(user_id)
            .await
            .map_err(ServiceError::missing("member"))?;

        let (rows, total) = self.ledger.find_by_user(user_id, req).await?;

        Ok(ApiResponsePagination {
            message: "member statements".into(),
            list: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }
}
