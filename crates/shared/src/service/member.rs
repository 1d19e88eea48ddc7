use crate::{
    abstract_trait::{
        agent::DynAgentClient,
        member::{repository::DynUserRepository, service::MemberAgentServiceTrait},
    },
    config::AgentConfig,
    domain::{requests::MemberAgentRequest, responses::ApiResponse},
    errors::ServiceError,
    model::UserModel,
    service::validate_request,
};
use async_trait::async_trait;
use tracing::info;

/// `AGENT_NAME` followed by `AGENT_START_NUMBER + user id`.
pub fn generate_member_code(agent_name: &str, start_number: i64, user_id: i64) -> String {
    format!("{agent_name}{}", start_number + user_id)
}

pub struct MemberAgentService {
    users: DynUserRepository,
    agent: DynAgentClient,
    agent_name: String,
    start_number: i64,
}

impl MemberAgentService {
    pub async fn new(users: DynUserRepository, agent: DynAgentClient, config: &AgentConfig) -> Self {
        Self {
            users,
            agent,
            agent_name: config.agent_name.clone(),
            start_number: config.start_number,
        }
    }

    async fn member(&self, user_id: i64) -> Result<UserModel, ServiceError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(ServiceError::missing("member"))
    }

    /// The member's code, assigning one on first use.
    async fn member_code(&self, user: &UserModel) -> Result<String, ServiceError> {
        if let Some(code) = user.member_code.as_deref().filter(|c| !c.is_empty()) {
            return Ok(code.to_string());
        }

        let code = generate_member_code(&self.agent_name, self.start_number, user.id);
        self.users.set_member_code(user.id, &code).await?;

        info!("assigned member code {code} to user {}", user.id);

        Ok(code)
    }
}

#[async_trait]
impl MemberAgentServiceTrait for MemberAgentService {
    async fn register(
        &self,
        user_id: i64,
        req: &MemberAgentRequest,
    ) -> Result<ApiResponse<String>, ServiceError> {
        validate_request(req)?;

        let user = self.member(user_id).await?;
        let code = self.member_code(&user).await?;

        self.agent.register(&code, &req.password).await?;

        info!("✅ Registered member {code} on agent");

        Ok(ApiResponse::ok("registered on agent", code))
    }

    async fn login(
        &self,
        user_id: i64,
        req: &MemberAgentRequest,
    ) -> Result<ApiResponse<String>, ServiceError> {
        validate_request(req)?;

        let user = self.member(user_id).await?;
        let code = self.member_code(&user).await?;

        let resp = self.agent.login(&code, &req.password).await?;

        Ok(ApiResponse::ok(
            resp.message.unwrap_or_else(|| "login success".into()),
            code,
        ))
    }

    async fn change_password(
        &self,
        user_id: i64,
        req: &MemberAgentRequest,
    ) -> Result<ApiResponse<String>, ServiceError> {
        validate_request(req)?;

        let user = self.member(user_id).await?;
        let code = self.member_code(&user).await?;

        let resp = self.agent.change_password(&code, &req.password).await?;

        Ok(ApiResponse::ok(
            resp.message.unwrap_or_else(|| "password changed".into()),
            code,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_code_offsets_user_id() {
        assert_eq!(generate_member_code("abc", 1000, 7), "abc1007");
        assert_eq!(generate_member_code("abc", 0, 42), "abc42");
    }
}
