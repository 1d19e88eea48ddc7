use crate::{
    domain::{requests::MemberAgentRequest, responses::ApiResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynMemberAgentService = Arc<dyn MemberAgentServiceTrait + Send + Sync>;

#[async_trait]
pub trait MemberAgentServiceTrait {
    async fn register(
        &self,
        user_id: i64,
        req: &MemberAgentRequest,
    ) -> Result<ApiResponse<String>, ServiceError>;

    async fn login(
        &self,
        user_id: i64,
        req: &MemberAgentRequest,
    ) -> Result<ApiResponse<String>, ServiceError>;

    async fn change_password(
        &self,
        user_id: i64,
        req: &MemberAgentRequest,
    ) -> Result<ApiResponse<String>, ServiceError>;
}
