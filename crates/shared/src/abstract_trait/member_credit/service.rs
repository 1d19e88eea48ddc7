use crate::{
    domain::{
        requests::{CreditChange, FindMemberStatements},
        responses::{ApiResponse, ApiResponsePagination, MemberStatementResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynMemberCreditService = Arc<dyn MemberCreditServiceTrait + Send + Sync>;

#[async_trait]
pub trait MemberCreditServiceTrait {
    async fn increase(
        &self,
        change: &CreditChange,
    ) -> Result<ApiResponse<MemberStatementResponse>, ServiceError>;

    async fn decrease(
        &self,
        change: &CreditChange,
    ) -> Result<ApiResponse<MemberStatementResponse>, ServiceError>;

    async fn find_member_statements(
        &self,
        user_id: i64,
        req: &FindMemberStatements,
    ) -> Result<ApiResponsePagination<Vec<MemberStatementResponse>>, ServiceError>;
}
