use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAuthRequest {
    pub agent_name: String,
    pub username: String,
    pub password: String,
    pub timestamp: i64,
    pub sign: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCreditRequest {
    pub agent_name: String,
    pub username: String,
    pub amount: f64,
    pub timestamp: i64,
    pub sign: String,
}

/// Player-side request to act on the member's agent account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MemberAgentRequest {
    #[validate(length(min = 6, max = 64, message = "password must be 6-64 characters"))]
    pub password: String,
}
